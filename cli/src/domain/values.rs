//! Chart values for one component: placement defaults merged with the
//! user's overrides.
//!
//! Pure functions only: no I/O, no async.

use serde_yaml::{Mapping, Value};

use crate::domain::plan::Component;

/// Placement block every Quditto chart reads:
///
/// ```yaml
/// placement:
///   nodeSelector: {}
///   useNodeName: true
///   nodeName: <nodek8s>
/// ```
///
/// Changing this shape breaks compatibility with the published charts.
#[must_use]
pub fn placement_values(nodek8s: &str) -> Mapping {
    let mut placement = Mapping::new();
    placement.insert("nodeSelector".into(), Value::Mapping(Mapping::new()));
    placement.insert("useNodeName".into(), true.into());
    placement.insert("nodeName".into(), nodek8s.into());

    let mut values = Mapping::new();
    values.insert("placement".into(), Value::Mapping(placement));
    values
}

/// Right-biased deep merge.
///
/// Where both sides hold a map the merge recurses; anywhere else the override
/// replaces the base value wholesale (sequences are not concatenated). Keys
/// new to `base` are appended after the existing ones.
#[must_use]
pub fn deep_merge(mut base: Mapping, overrides: &Mapping) -> Mapping {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                *existing = deep_merge(std::mem::take(existing), incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
    base
}

/// Effective values for `component`.
#[must_use]
pub fn component_values(component: &Component<'_>) -> Mapping {
    deep_merge(placement_values(component.nodek8s), component.values)
}
