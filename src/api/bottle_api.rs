// ==========================================
// BottleApi - evaluation + history
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::bottle::Bottle;
use crate::domain::decision::Decision;
use crate::engine::decision_engine::BottleDecisionEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionHistoryView {
    pub history: Vec<Decision>,
}

pub struct BottleApi {
    engine: Arc<BottleDecisionEngine>,
}

impl BottleApi {
    pub fn new(engine: Arc<BottleDecisionEngine>) -> Self {
        Self { engine }
    }

    /// Evaluate one bottle; always yields a decision (the engine falls
    /// back through static rules to the default).
    pub fn evaluate(&self, bottle: &Bottle) -> ApiResult<Decision> {
        Ok(self.engine.evaluate(bottle))
    }

    /// The bounded decision history, oldest first (at most 10 entries).
    pub fn history(&self) -> ApiResult<DecisionHistoryView> {
        Ok(DecisionHistoryView {
            history: self.engine.history(),
        })
    }
}
