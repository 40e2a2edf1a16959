//! Storage cost comparison between an RDBMS and a NoSQL store.

use crate::CliResult;

pub const RDBMS_COST_PER_TB: u64 = 200;
pub const NOSQL_COST_PER_TB: u64 = 120;
pub const MIN_VOLUME_TB: u32 = 1;
pub const MAX_VOLUME_TB: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostComparison {
    pub volume_tb: u32,
    pub rdbms: u64,
    pub nosql: u64,
}

impl CostComparison {
    pub fn for_volume(volume_tb: u32) -> CliResult<Self> {
        if !(MIN_VOLUME_TB..=MAX_VOLUME_TB).contains(&volume_tb) {
            return Err(format!(
                "Data volume must be between {} and {} TB, got {}",
                MIN_VOLUME_TB, MAX_VOLUME_TB, volume_tb
            ));
        }
        let tb = u64::from(volume_tb);
        Ok(Self {
            volume_tb,
            rdbms: tb * RDBMS_COST_PER_TB,
            nosql: tb * NOSQL_COST_PER_TB,
        })
    }

    pub fn savings(&self) -> u64 {
        self.rdbms - self.nosql
    }
}
