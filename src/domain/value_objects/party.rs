//! Party composition - Who is travelling

use serde::{Deserialize, Serialize};

pub const MIN_CHARACTER_LEVEL: u32 = 1;
pub const MAX_CHARACTER_LEVEL: u32 = 20;

/// A group of identical player characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub level: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl PartyMember {
    pub fn new(level: u32, quantity: u32) -> Self {
        Self { level, quantity }
    }
}

/// An empty composition is valid and means "no party specified".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyComposition {
    #[serde(default)]
    pub pcs: Vec<PartyMember>,
}

impl PartyComposition {
    pub fn new(pcs: Vec<PartyMember>) -> Self {
        Self { pcs }
    }

    pub fn is_empty(&self) -> bool {
        self.pcs.is_empty()
    }

    /// Total characters, `None` when the sum does not fit in a `u32`
    pub fn size(&self) -> Option<u32> {
        self.pcs
            .iter()
            .try_fold(0u32, |total, pc| total.checked_add(pc.quantity))
    }

    /// Check level and quantity bounds of every entry
    pub fn validate(&self) -> Result<(), String> {
        if self.size().is_none() {
            return Err("Party size is too large".to_string());
        }
        for pc in &self.pcs {
            if !(MIN_CHARACTER_LEVEL..=MAX_CHARACTER_LEVEL).contains(&pc.level) {
                return Err(format!(
                    "Character level {} is outside {}..={}",
                    pc.level, MIN_CHARACTER_LEVEL, MAX_CHARACTER_LEVEL
                ));
            }
            if pc.quantity == 0 {
                return Err("Party member quantity must be at least 1".to_string());
            }
        }
        Ok(())
    }
}
