// ==========================================
// Static per-airline rule sets
// ==========================================
// Hardcoded condition -> action rules, evaluated first-match-wins.
// The fallback for unknown airline codes is the EK list; any change to
// these lists is a behavioral compatibility break for existing clients.
// ==========================================

use crate::domain::bottle::{Bottle, Cleanliness, LabelStatus, SealStatus};
use crate::domain::decision::BottleAction;

/// Unrecognized airline codes use this code's rule list.
pub const DEFAULT_AIRLINE_CODE: &str = "EK";

/// One hardcoded rule: predicate -> action with a fixed reason.
pub struct StaticRule {
    pub action: BottleAction,
    pub reason: &'static str,
    pub condition: fn(&Bottle) -> bool,
}

// Emirates
static EK_RULES: [StaticRule; 3] = [
    StaticRule {
        action: BottleAction::Discard,
        reason: "Emirates policy: Discard all opened bottles",
        condition: |b| b.seal_status == SealStatus::Opened,
    },
    StaticRule {
        action: BottleAction::Refill,
        reason: "Fill level below 90% - requires refill",
        condition: |b| b.fill_level < 90.0 && b.cleanliness != Cleanliness::Poor,
    },
    StaticRule {
        action: BottleAction::Replace,
        reason: "Label heavily damaged - replace bottle",
        condition: |b| b.label_status == LabelStatus::HeavilyDamaged,
    },
];

// British Airways
static BA_RULES: [StaticRule; 2] = [
    StaticRule {
        action: BottleAction::Discard,
        reason: "British Airways: Discard all opened bottles",
        condition: |b| b.seal_status == SealStatus::Opened,
    },
    StaticRule {
        action: BottleAction::Replace,
        reason: "Fill level below 80% - replace bottle",
        condition: |b| b.fill_level < 80.0,
    },
];

// Swiss International Air Lines
static LX_RULES: [StaticRule; 2] = [
    StaticRule {
        action: BottleAction::Keep,
        reason: "Swiss Air: Reuse if above 70% fill and sealed",
        condition: |b| b.fill_level > 70.0 && b.seal_status == SealStatus::Sealed,
    },
    StaticRule {
        action: BottleAction::Refill,
        reason: "Partial bottle - refill for reuse",
        condition: |b| b.fill_level <= 70.0 && b.fill_level > 50.0,
    },
];

/// The ordered rule list for an airline code; unknown codes get EK's list.
pub fn rules_for(customer_code: &str) -> &'static [StaticRule] {
    match customer_code {
        "EK" => &EK_RULES,
        "BA" => &BA_RULES,
        "LX" => &LX_RULES,
        _ => &EK_RULES,
    }
}
