//! `qd2 config`: inspect the tool configuration.

use std::process::ExitCode;

use clap::Subcommand;

use crate::app::AppContext;
use crate::output::HumanRenderer;

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Run the config command.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> ExitCode {
    match cmd {
        ConfigCommand::Show => {
            HumanRenderer::new(&app.output).render_config(&app.config, &app.config_path);
            ExitCode::SUCCESS
        }
    }
}
