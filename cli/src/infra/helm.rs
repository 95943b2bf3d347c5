//! Helm CLI implementation of the `InstallerGateway` port.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, InstallRequest, InstallerGateway, ResultCode, UninstallRequest,
};
use crate::domain::error::InstallerError;

/// Infrastructure adapter that routes all Helm calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes. Every command line is handed to the
/// echo callback, if one is set, before it runs.
pub struct HelmCli<R: CommandRunner> {
    runner: R,
    binary: String,
    query_timeout: Duration,
    echo: Option<Box<dyn Fn(&str)>>,
}

impl<R: CommandRunner> HelmCli<R> {
    pub fn new(runner: R, binary: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            runner,
            binary: binary.into(),
            query_timeout,
            echo: None,
        }
    }

    /// Show each command line (`$ helm ...`) through `echo` before running it.
    #[must_use]
    pub fn with_echo(mut self, echo: impl Fn(&str) + 'static) -> Self {
        self.echo = Some(Box::new(echo));
        self
    }

    fn show(&self, args: &[&str], suffix: &str) {
        let line = render_command(&self.binary, args);
        tracing::debug!(command = %line, "helm");
        if let Some(echo) = &self.echo {
            echo(&format!("$ {line}{suffix}"));
        }
    }

    /// Run with inherited stdio so Helm's own output streams to the terminal.
    async fn stream(&self, args: &[&str]) -> Result<ResultCode> {
        self.show(args, "");
        let status = self
            .runner
            .run_status(&self.binary, args)
            .await
            .with_context(|| format!("failed to run {}", self.binary))?;
        // Killed by a signal: there is no code to propagate.
        Ok(status.code().unwrap_or(1))
    }
}

/// `helm upgrade --install` arguments for `request`.
#[must_use]
pub fn upgrade_install_args<'a>(request: &InstallRequest<'a>) -> Vec<&'a str> {
    let mut args = vec![
        "upgrade",
        "--install",
        request.release,
        request.chart_ref,
        "-n",
        request.namespace,
        "--create-namespace",
    ];
    for expr in request.set_values {
        args.push("--set");
        args.push(expr);
    }
    if let Some(version) = request.version {
        args.push("--version");
        args.push(version);
    }
    if request.dry_run {
        args.push("--dry-run");
        args.push("--debug");
    }
    args
}

/// `helm uninstall` arguments for `request`.
#[must_use]
pub fn uninstall_args<'a>(request: &UninstallRequest<'a>) -> Vec<&'a str> {
    let mut args = vec!["uninstall", request.release, "-n", request.namespace];
    if request.wait {
        args.push("--wait");
    }
    if request.keep_history {
        args.push("--keep-history");
    }
    args
}

/// Join a command line for display, single-quoting arguments the shell
/// would otherwise split or expand.
#[must_use]
pub fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

impl<R: CommandRunner> InstallerGateway for HelmCli<R> {
    async fn register_source(&self, alias: &str, url: &str) -> Result<()> {
        for args in [
            vec!["repo", "add", alias, url, "--force-update"],
            vec!["repo", "update"],
        ] {
            let code = self.stream(&args).await?;
            if code != 0 {
                return Err(InstallerError::Failed {
                    operation: format!("{} {} {}", self.binary, args[0], args[1]),
                    code,
                }
                .into());
            }
        }
        Ok(())
    }

    async fn install_or_upgrade(&self, request: &InstallRequest<'_>) -> Result<ResultCode> {
        self.stream(&upgrade_install_args(request)).await
    }

    async fn list_installed(&self, namespace: &str) -> Result<HashSet<String>> {
        let args = ["list", "-n", namespace, "-q", "--all"];
        self.show(&args, "");
        let output = self
            .runner
            .run_with_timeout(&self.binary, &args, self.query_timeout)
            .await
            .with_context(|| format!("failed to run {}", self.binary))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "cannot list releases in namespace '{namespace}': {}",
                stderr.trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn uninstall(&self, request: &UninstallRequest<'_>) -> Result<ResultCode> {
        let args = uninstall_args(request);
        if request.dry_run {
            // Helm has no dry run for uninstall; report and succeed.
            self.show(&args, "  (dry-run)");
            return Ok(0);
        }
        self.stream(&args).await
    }
}
