use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("no turbo slots left")]
    NoTurboSlots,
    #[error("turbo already active: {0}")]
    AlreadyActive(String),
}

/// Turbo modifiers bought this session, in acquisition order. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    pub turbo_slots: usize,
    pub turbos: Vec<String>,
}

impl Inventory {
    pub fn new(turbo_slots: usize) -> Self {
        Self {
            turbo_slots,
            turbos: Vec::new(),
        }
    }

    pub fn has_turbo(&self, id: &str) -> bool {
        self.turbos.iter().any(|owned| owned == id)
    }

    pub fn owned_turbos(&self) -> HashSet<String> {
        self.turbos.iter().cloned().collect()
    }

    pub fn check_add_turbo(&self, id: &str) -> Result<(), InventoryError> {
        if self.has_turbo(id) {
            return Err(InventoryError::AlreadyActive(id.to_string()));
        }
        if self.turbos.len() >= self.turbo_slots {
            return Err(InventoryError::NoTurboSlots);
        }
        Ok(())
    }

    pub fn add_turbo(&mut self, id: String) -> Result<(), InventoryError> {
        self.check_add_turbo(&id)?;
        self.turbos.push(id);
        Ok(())
    }
}
