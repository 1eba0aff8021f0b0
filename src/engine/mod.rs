// ==========================================
// Catering Execution Hub - bottle rule engine
// ==========================================
// Business rules only, no SQL assembly here.
// Every rule outputs a reason.
// ==========================================

pub mod airline_rules;
pub mod condition;
pub mod dataset_rules;
pub mod decision_engine;
pub mod header_map;

// Re-export core engine types
pub use airline_rules::{rules_for, StaticRule, DEFAULT_AIRLINE_CODE};
pub use condition::NumericCondition;
pub use dataset_rules::{DatasetRuleEvaluator, RuleMatch};
pub use decision_engine::{BottleDecisionEngine, DecisionHistory, HISTORY_CAPACITY};
pub use header_map::{map_header, BottleField};
