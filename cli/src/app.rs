//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the output context, the loaded configuration and the
//! interactivity decision. Command handlers build their infrastructure
//! adapters from it instead of reading flags and files themselves.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ConfigStore, Confirmer};
use crate::domain::config::Qd2Config;
use crate::domain::error::SpecError;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::config::YamlConfigStore;
use crate::infra::helm::HelmCli;
use crate::output::{OutputContext, command_echo};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Effective configuration (file values over built-in defaults).
    pub config: Qd2Config,
    /// Where the configuration was looked up.
    pub config_path: PathBuf,
    /// When `true`, prompts are not shown and resolve to their default.
    ///
    /// Set when the `CI` environment variable is present or stdin is not a
    /// terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// or [`SpecError::InvalidConfig`] if it holds invalid values.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        Self::with_store(flags, &YamlConfigStore)
    }

    /// Like [`AppContext::new`] with an explicit configuration store.
    ///
    /// # Errors
    ///
    /// See [`AppContext::new`].
    pub fn with_store(flags: &AppFlags, store: &impl ConfigStore) -> Result<Self> {
        let config_path = store.path()?;
        let config = store.load()?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(SpecError::InvalidConfig {
                path: config_path,
                errors,
            }
            .into());
        }

        let non_interactive = std::env::var("CI").is_ok() || !std::io::stdin().is_terminal();

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            config,
            config_path,
            non_interactive,
        })
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` immediately
    /// without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    /// Helm gateway for the given cluster credentials.
    ///
    /// `kubeconfig` is exported to the Helm process only; this process's
    /// environment is not modified.
    #[must_use]
    pub fn helm(&self, kubeconfig: Option<&Path>) -> HelmCli<TokioCommandRunner> {
        let mut runner = TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT);
        if let Some(path) = kubeconfig {
            runner = runner.with_env("KUBECONFIG", path);
        }
        let helm = HelmCli::new(
            runner,
            self.config.helm.binary.clone(),
            Duration::from_secs(self.config.helm.query_timeout_secs),
        );
        if self.output.quiet {
            helm
        } else {
            helm.with_echo(command_echo(&self.output.styles))
        }
    }
}

impl Confirmer for AppContext {
    /// Destructive prompts default to "no".
    fn confirm(&self, prompt: &str) -> Result<bool> {
        AppContext::confirm(self, prompt, false)
    }
}
