// lib/crates/qd2-common/src/spec.rs

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// Quditto deploy spec (`quditto-deploy.yaml`).
///
/// This type only captures the document shape. Naming rules and uniqueness
/// are checked separately by the CLI's validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QudittoDeploySpec {
    #[serde(default)]
    pub namespace: Option<String>,
    pub charts: ChartSource,
    #[serde(rename = "qudittoSetup")]
    pub setup: QudittoSetup,
}

/// Chart repository the components are installed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSource {
    pub repo: String,
}

/// The set of components to place on the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QudittoSetup {
    #[serde(default)]
    pub qcontroller: Option<ComponentRef>,
    #[serde(default)]
    pub qorchestrator: Option<ComponentRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub qnodes: Vec<NodeRef>,
}

/// A singleton component (controller or orchestrator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Kubernetes node the component is pinned to.
    pub nodek8s: String,
    pub chart: String,
    #[serde(default, deserialize_with = "string_version")]
    pub version: Option<String>,
    /// Chart values layered over the placement defaults.
    #[serde(default, deserialize_with = "values_tree")]
    pub values: Mapping,
}

/// A named Quditto node. `name` doubles as the Helm release name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    pub name: String,
    pub nodek8s: String,
    pub chart: String,
    #[serde(default, deserialize_with = "string_version")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "values_tree")]
    pub values: Mapping,
}

/// YAML reads an unquoted `version: 1.10` as the float `1.1`, so only
/// string versions are accepted.
fn string_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(version)) => Ok(Some(version)),
        Some(_) => Err(D::Error::custom(
            "version must be a string; quote it (version: \"1.10\")",
        )),
    }
}

/// `values: ~` means no overrides. Duplicate keys are already rejected by
/// `Mapping`; collection keys are rejected here at any depth.
fn values_tree<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mapping, D::Error> {
    let values = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
    check_keys(&values).map_err(D::Error::custom)?;
    Ok(values)
}

fn check_keys(map: &Mapping) -> Result<(), &'static str> {
    for (key, value) in map {
        if matches!(key, Value::Sequence(_) | Value::Mapping(_)) {
            return Err("mapping keys in values must be scalars");
        }
        check_nested_keys(value)?;
    }
    Ok(())
}

fn check_nested_keys(value: &Value) -> Result<(), &'static str> {
    match value {
        Value::Mapping(map) => check_keys(map),
        Value::Sequence(items) => items.iter().try_for_each(check_nested_keys),
        Value::Tagged(tagged) => check_nested_keys(&tagged.value),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
    }
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
