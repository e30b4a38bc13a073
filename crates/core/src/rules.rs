use serde::{Deserialize, Serialize};

/// Running chips/multiplier pair for one hand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub chips: i64,
    pub mult: i64,
}

impl Score {
    pub fn apply(&mut self, effect: &RuleEffect) {
        match effect {
            RuleEffect::AddChips(value) => self.chips += value,
            RuleEffect::AddMult(value) => self.mult += value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleEffect {
    AddChips(i64),
    AddMult(i64),
}
