//! Deploy-spec parsing and validation.
//!
//! Parsing is structural only (document shape, via serde). Naming rules,
//! uniqueness and required components are checked by [`validate`], which
//! collects every violation instead of stopping at the first one.

use std::collections::HashSet;

use qd2_common::{ComponentRef, QudittoDeploySpec};

use crate::domain::error::{FieldError, SpecError};
use crate::domain::identifier::Identifier;

/// Fixed release name of the controller component.
pub const CONTROLLER_RELEASE: &str = "qcontroller";

/// Fixed release name of the orchestrator component.
pub const ORCHESTRATOR_RELEASE: &str = "qorchestrator";

/// What the spec is about to be used for.
///
/// A deploy needs a controller; tearing down a partial setup does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Deploy,
    Teardown,
}

/// Parse a YAML deploy-spec document into its structural form.
///
/// # Errors
///
/// Returns [`SpecError::Malformed`] on the first shape error. The message
/// carries the field path and document location reported by the YAML parser.
pub fn parse_document(document: &str) -> Result<QudittoDeploySpec, SpecError> {
    serde_yaml::from_str(document).map_err(|e| SpecError::Malformed(e.to_string()))
}

/// Parse and validate a deploy-spec document.
///
/// # Errors
///
/// Returns [`SpecError::Malformed`] for shape errors and
/// [`SpecError::Invalid`] listing all semantic violations.
pub fn parse(document: &str, purpose: Purpose) -> Result<QudittoDeploySpec, SpecError> {
    let spec = parse_document(document)?;
    ensure_valid(&spec, purpose)?;
    Ok(spec)
}

/// Run [`validate`] and turn a non-empty report into an error.
///
/// # Errors
///
/// Returns [`SpecError::Invalid`] when any field fails validation.
pub fn ensure_valid(spec: &QudittoDeploySpec, purpose: Purpose) -> Result<(), SpecError> {
    let errors = validate(spec, purpose);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SpecError::Invalid(errors))
    }
}

/// Validate naming rules, node-name uniqueness and required components.
///
/// Pure function: no I/O. Returns an empty vector when the spec is valid.
#[must_use]
pub fn validate(spec: &QudittoDeploySpec, purpose: Purpose) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(ns) = &spec.namespace {
        check_identifier(&mut errors, ns, "namespace");
    }

    if spec.charts.repo.trim().is_empty() {
        errors.push(FieldError::new("charts.repo", "must not be empty"));
    }

    let setup = &spec.setup;
    match &setup.qcontroller {
        Some(ctrl) => check_component(&mut errors, "qudittoSetup.qcontroller", ctrl),
        None if purpose == Purpose::Deploy => errors.push(FieldError::new(
            "qudittoSetup.qcontroller",
            "is required to deploy",
        )),
        None => {}
    }
    if let Some(orch) = &setup.qorchestrator {
        check_component(&mut errors, "qudittoSetup.qorchestrator", orch);
    }

    let mut seen = HashSet::new();
    for (i, node) in setup.qnodes.iter().enumerate() {
        let prefix = format!("qudittoSetup.qnodes[{i}]");
        let name_field = format!("{prefix}.name");

        check_identifier(&mut errors, &node.name, &name_field);
        if node.name == CONTROLLER_RELEASE || node.name == ORCHESTRATOR_RELEASE {
            errors.push(FieldError::new(
                &name_field,
                format!("'{}' is reserved for a fixed component", node.name),
            ));
        }
        if !seen.insert(node.name.as_str()) {
            errors.push(FieldError::new(
                &name_field,
                format!("duplicated qnode name: {}", node.name),
            ));
        }

        check_identifier(&mut errors, &node.nodek8s, &format!("{prefix}.nodek8s"));
        check_identifier(&mut errors, &node.chart, &format!("{prefix}.chart"));
    }

    errors
}

fn check_component(errors: &mut Vec<FieldError>, prefix: &str, component: &ComponentRef) {
    check_identifier(errors, &component.nodek8s, &format!("{prefix}.nodek8s"));
    check_identifier(errors, &component.chart, &format!("{prefix}.chart"));
}

fn check_identifier(errors: &mut Vec<FieldError>, value: &str, field: &str) {
    if let Err(e) = Identifier::parse(value, field) {
        errors.push(e);
    }
}
