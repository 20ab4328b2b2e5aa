use crate::{NumberFormat, ProviderDescriptor, Scope, Value};
use serde::{Deserialize, Serialize};

/// One provider's materialized value, with the display fields the host needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub format: NumberFormat,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub show_in_player_table: bool,
    pub value: Value,
}

impl DataPoint {
    pub fn new(descriptor: &ProviderDescriptor, value: Value) -> Self {
        Self {
            name: descriptor.name.clone(),
            text: descriptor.text.clone(),
            description: descriptor.description.clone(),
            priority: descriptor.priority,
            format: descriptor.format,
            hidden: descriptor.hidden,
            show_in_player_table: descriptor.show_in_player_table,
            value,
        }
    }
}

/// The outcome of evaluating every provider in one scope.
///
/// `points` holds the providers whose condition chain held, highest priority
/// first. Providers whose condition failed are absent, never present with a
/// placeholder. `unavailable` names server providers that could not be
/// computed because the external service was not ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub scope: Scope,
    pub points: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<String>,
}

impl EvaluationResult {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            points: Vec::new(),
            unavailable: Vec::new(),
        }
    }

    /// Value of the named provider, if it was offered.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.points.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Provider names in result order.
    pub fn names(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serializes the result for the host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
