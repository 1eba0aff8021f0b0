// ==========================================
// Catering Execution Hub - bottle decision
// ==========================================

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Canonical actions
// ==========================================
// Static airline rules only ever produce these four. Dynamic dataset rules
// may supply any string; `Decision.action` therefore stays a string and the
// display color is derived by exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleAction {
    Keep,
    Refill,
    Replace,
    Discard,
}

impl BottleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottleAction::Keep => "Keep",
            BottleAction::Refill => "Refill",
            BottleAction::Replace => "Replace",
            BottleAction::Discard => "Discard",
        }
    }
}

impl fmt::Display for BottleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Display color
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionColor {
    Success,
    Warning,
    Danger,
    Dark,
    Secondary,
}

impl ActionColor {
    /// Fixed action -> color table. Unrecognized actions (possible through
    /// dynamic dataset rules) render as `secondary`.
    pub fn for_action(action: &str) -> Self {
        match action {
            "Keep" => ActionColor::Success,
            "Refill" => ActionColor::Warning,
            "Replace" => ActionColor::Danger,
            "Discard" => ActionColor::Dark,
            _ => ActionColor::Secondary,
        }
    }
}

// ==========================================
// Decision
// ==========================================
/// Outcome of one bottle evaluation.
///
/// Transient but accumulated: every decision is appended to the engine's
/// bounded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: String,
    pub reason: String,
    /// RFC 3339 evaluation time
    pub timestamp: String,
    pub color: ActionColor,
}

impl Decision {
    /// Build a decision stamped with the current time; the color is derived
    /// from the action string.
    pub fn new(action: impl Into<String>, reason: impl Into<String>) -> Self {
        let action = action.into();
        Self {
            color: ActionColor::for_action(&action),
            action,
            reason: reason.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
