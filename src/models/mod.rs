mod row;
mod summary;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use row::ImportedRow;
pub use summary::ImportSummary;

/// Server-side validation outcome of a parsed row, carried as `1`/`0` on the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RowStatus {
    Invalid,
    Valid
}

impl RowStatus {
    pub fn is_valid(&self) -> bool {
        *self == RowStatus::Valid
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Invalid => "invalid",
            RowStatus::Valid => "valid"
        }
    }
}

impl TryFrom<u8> for RowStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RowStatus::Invalid),
            1 => Ok(RowStatus::Valid),
            other => Err(format!("Unknown row status code [{other}]"))
        }
    }
}

impl From<RowStatus> for u8 {
    fn from(status: RowStatus) -> Self {
        match status {
            RowStatus::Invalid => 0,
            RowStatus::Valid => 1
        }
    }
}
