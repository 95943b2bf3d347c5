//! Deployment sequencing: which components exist, in what order, under
//! which release names and in which namespace.
//!
//! Pure functions only: no I/O, no async.

use qd2_common::{ComponentRef, NodeRef, QudittoDeploySpec};
use serde_yaml::Mapping;

use crate::domain::spec::{CONTROLLER_RELEASE, ORCHESTRATOR_RELEASE};

/// Namespace used when neither the command line nor the spec names one.
pub const DEFAULT_NAMESPACE: &str = "quditto";

/// Chart source alias used when none is configured.
pub const DEFAULT_REPO_ALIAS: &str = "quditto";

/// One deployable unit, borrowed from the spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component<'a> {
    pub release: &'a str,
    pub nodek8s: &'a str,
    pub chart: &'a str,
    pub version: Option<&'a str>,
    pub values: &'a Mapping,
}

impl<'a> Component<'a> {
    fn fixed(release: &'a str, c: &'a ComponentRef) -> Self {
        Self {
            release,
            nodek8s: &c.nodek8s,
            chart: &c.chart,
            version: c.version.as_deref(),
            values: &c.values,
        }
    }

    fn node(n: &'a NodeRef) -> Self {
        Self {
            release: &n.name,
            nodek8s: &n.nodek8s,
            chart: &n.chart,
            version: n.version.as_deref(),
            values: &n.values,
        }
    }

    /// `<alias>/<chart>` reference passed to the installer.
    #[must_use]
    pub fn chart_ref(&self, repo_alias: &str) -> String {
        format!("{repo_alias}/{}", self.chart)
    }
}

/// A position in the fixed deploy sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    Present(Component<'a>),
    /// The spec leaves this position empty; carries the section name.
    Absent(&'static str),
}

/// `qcontroller → qorchestrator → qnodes[in list order]`.
///
/// An empty node list yields a single `Absent("qnodes")` slot.
#[must_use]
pub fn deployment_sequence(spec: &QudittoDeploySpec) -> Vec<Slot<'_>> {
    let setup = &spec.setup;
    let mut slots = Vec::with_capacity(2 + setup.qnodes.len().max(1));

    slots.push(match &setup.qcontroller {
        Some(c) => Slot::Present(Component::fixed(CONTROLLER_RELEASE, c)),
        None => Slot::Absent(CONTROLLER_RELEASE),
    });
    slots.push(match &setup.qorchestrator {
        Some(c) => Slot::Present(Component::fixed(ORCHESTRATOR_RELEASE, c)),
        None => Slot::Absent(ORCHESTRATOR_RELEASE),
    });
    if setup.qnodes.is_empty() {
        slots.push(Slot::Absent("qnodes"));
    } else {
        slots.extend(setup.qnodes.iter().map(|n| Slot::Present(Component::node(n))));
    }

    slots
}

/// Release names a teardown should remove, in deploy-sequence order.
#[must_use]
pub fn teardown_targets(spec: &QudittoDeploySpec) -> Vec<String> {
    deployment_sequence(spec)
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Present(c) => Some(c.release.to_string()),
            Slot::Absent(_) => None,
        })
        .collect()
}

/// Explicit override, then the spec's own namespace, then `fallback`.
#[must_use]
pub fn resolve_namespace<'a>(
    override_ns: Option<&'a str>,
    spec_ns: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    override_ns.or(spec_ns).unwrap_or(fallback)
}
