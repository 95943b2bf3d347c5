//! Command implementations

pub mod config;
pub mod deploy;
pub mod teardown;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use qd2_common::QudittoDeploySpec;

use crate::domain::config::Qd2Config;
use crate::domain::error::{InstallerError, SpecError};
use crate::domain::identifier::Identifier;
use crate::domain::plan::resolve_namespace;
use crate::infra::spec_loader::load_spec;

/// Exit status for input and validation failures.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Arguments shared by every command that reads a deploy spec.
#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
    /// Deploy spec (YAML)
    #[arg(short = 'f', long = "file", value_name = "SPEC")]
    pub file: PathBuf,

    /// Target namespace (overrides the spec and the configured default)
    #[arg(short = 'n', long, value_name = "NS")]
    pub namespace: Option<String>,
}

/// A loaded spec together with the namespace it targets.
pub(crate) struct LoadedSpec {
    pub spec: QudittoDeploySpec,
    pub namespace: String,
}

impl SpecArgs {
    /// Check the namespace override, read the spec and resolve the namespace.
    pub(crate) fn load(&self, config: &Qd2Config) -> Result<LoadedSpec, SpecError> {
        let override_ns = checked_option(self.namespace.as_deref(), "--namespace")?;
        let spec = load_spec(&self.file)?;
        let namespace = resolve_namespace(
            override_ns,
            spec.namespace.as_deref(),
            &config.defaults.namespace,
        )
        .to_string();
        tracing::debug!(spec = %self.file.display(), %namespace, "resolved namespace");
        Ok(LoadedSpec { spec, namespace })
    }
}

/// Validate an identifier given on the command line.
pub(crate) fn checked_option<'a>(
    value: Option<&'a str>,
    flag: &str,
) -> Result<Option<&'a str>, SpecError> {
    match value {
        Some(v) => {
            Identifier::parse(v, flag).map_err(SpecError::InvalidOption)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

/// `--kubeconfig` if given, else the configured default; the file must exist.
pub(crate) fn resolve_kubeconfig(
    flag: Option<&Path>,
    config: &Qd2Config,
) -> Result<Option<PathBuf>, SpecError> {
    let Some(path) = flag.or(config.defaults.kubeconfig.as_deref()) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Err(SpecError::KubeconfigNotFound(path.to_path_buf()));
    }
    Ok(Some(path.to_path_buf()))
}

/// Process exit status for an installer result code.
///
/// Codes outside `1..=255` collapse to `1`.
#[must_use]
pub fn installer_status(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

/// Process exit status for an error that ended a command.
///
/// Input and validation errors anywhere in the chain map to `2`, installer
/// failures to the installer's own code, everything else to `1`.
#[must_use]
pub fn exit_status_for(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.downcast_ref::<SpecError>().is_some() {
            return EXIT_INVALID_INPUT;
        }
        if let Some(installer) = cause.downcast_ref::<InstallerError>() {
            return installer_status(installer.code());
        }
    }
    1
}
