use crate::models::{ImportSummary, ImportedRow};
use crate::types::RowNumber;

/// First phase of a row exclusion, awaiting operator confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub row_number: RowNumber,
    pub house_no: String
}

impl Confirmation {
    pub fn prompt(&self) -> String {
        format!("Remove house [{}] (row {}) from this import?", self.house_no, self.row_number)
    }
}

/// Result of confirming an exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionOutcome {
    /// The row left the active set; `remaining` rows are still active.
    RowExcluded {
        row_number: RowNumber,
        remaining: usize
    },
    /// The last active row was removed and the whole batch was reset.
    BatchEmptied,
    /// The row was not in the active set.
    Unchanged
}

impl ExclusionOutcome {
    /// Operator-facing acknowledgement, if the outcome warrants one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ExclusionOutcome::RowExcluded { .. } => Some("Row removed from the import"),
            ExclusionOutcome::BatchEmptied => Some("Last item removed, please re-upload the file"),
            ExclusionOutcome::Unchanged => None
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    LoadBatch {
        rows: Vec<ImportedRow>,
        summary: ImportSummary
    },
    RequestExclusion {
        row_number: RowNumber,
        house_no: String
    },
    ConfirmExclusion,
    CancelExclusion,
    Reset
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Loaded {
        rows: usize
    },
    ConfirmationRequested(Confirmation),
    Excluded(ExclusionOutcome),
    Cancelled,
    Cleared,
    Unchanged
}
