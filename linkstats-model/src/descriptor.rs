use crate::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a provider reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One value per player; evaluated with a player subject.
    Player,
    /// One value per server; evaluated without a subject.
    Server,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Player => f.write_str("player"),
            Scope::Server => f.write_str("server"),
        }
    }
}

/// Host events on which providers are queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    PlayerJoin,
    PlayerLeave,
    /// The extension was registered with the host.
    Registration,
    /// The host's periodic server tick.
    Periodic,
}

impl Trigger {
    pub const ALL: [Trigger; 4] = [
        Trigger::PlayerJoin,
        Trigger::PlayerLeave,
        Trigger::Registration,
        Trigger::Periodic,
    ];

    /// The scope the host requests for this trigger.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self {
            Trigger::PlayerJoin | Trigger::PlayerLeave => Scope::Player,
            Trigger::Registration | Trigger::Periodic => Scope::Server,
        }
    }
}

/// How the host should render an integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    #[default]
    Plain,
    /// Epoch milliseconds, rendered as a date with year.
    DateYear,
}

/// Describes one registered data point.
///
/// Descriptors are the registration surface handed to the host once at
/// startup. The compute function lives next to the descriptor in the
/// registry, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Unique within its scope. Conditions refer to providers by this name.
    pub name: String,
    /// Display label.
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub kind: ValueKind,
    pub scope: Scope,
    /// Display order; higher first.
    #[serde(default)]
    pub priority: i32,
    /// Name of a boolean provider in the same scope that must hold for this
    /// one to be offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub format: NumberFormat,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub show_in_player_table: bool,
    /// Computed even while the external service is not ready.
    #[serde(default)]
    pub readiness_exempt: bool,
}

impl ProviderDescriptor {
    fn simple(name: &str, kind: ValueKind, scope: Scope) -> Self {
        Self {
            name: name.into(),
            text: name.into(),
            description: String::new(),
            kind,
            scope,
            priority: 0,
            condition: None,
            format: NumberFormat::Plain,
            hidden: false,
            show_in_player_table: false,
            readiness_exempt: false,
        }
    }

    /// Shorthand for a boolean provider.
    pub fn boolean(name: &str, scope: Scope) -> Self {
        Self::simple(name, ValueKind::Boolean, scope)
    }

    /// Shorthand for a string provider.
    pub fn string(name: &str, scope: Scope) -> Self {
        Self::simple(name, ValueKind::String, scope)
    }

    /// Shorthand for an integer provider.
    pub fn integer(name: &str, scope: Scope) -> Self {
        Self::simple(name, ValueKind::Integer, scope)
    }

    /// Shorthand for a percentage provider (ratio in `0.0..=1.0`).
    pub fn percentage(name: &str, scope: Scope) -> Self {
        Self::simple(name, ValueKind::Percentage, scope)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.into();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Only offer this provider when the named boolean provider is true.
    pub fn conditional_on(mut self, condition: &str) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Render integer values as dates.
    pub fn date(mut self) -> Self {
        self.format = NumberFormat::DateYear;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn in_player_table(mut self) -> Self {
        self.show_in_player_table = true;
        self
    }

    pub fn readiness_exempt(mut self) -> Self {
        self.readiness_exempt = true;
        self
    }
}
