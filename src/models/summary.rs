use serde::{Deserialize, Serialize};

use crate::models::ImportedRow;
use crate::types::Money;

/// Aggregate counts and the VALID total for an import batch.
///
/// Issued by the upload service and then adjusted locally as rows are
/// excluded. `total_price` travels as a formatted currency string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: u32,
    pub valid_rows: u32,
    pub invalid_rows: u32,
    pub total_price: Money
}

impl ImportSummary {
    /// Derives a summary from scratch over the given rows.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ImportedRow>,
    {
        let mut summary = ImportSummary::default();

        for row in rows {
            summary.total_rows += 1;

            if row.is_valid() {
                summary.valid_rows += 1;
                summary.total_price += row.total_price;
            } else {
                summary.invalid_rows += 1;
            }
        }

        summary
    }

    /// Whether the counters agree with each other (`total = valid + invalid`).
    pub fn is_balanced(&self) -> bool {
        u64::from(self.valid_rows) + u64::from(self.invalid_rows) == u64::from(self.total_rows)
    }

    /// Removes one row's contribution from the counters and the VALID total.
    pub(crate) fn subtract(&mut self, row: &ImportedRow) {
        self.total_rows = self.total_rows.saturating_sub(1);

        if row.is_valid() {
            self.valid_rows = self.valid_rows.saturating_sub(1);
            self.total_price -= row.total_price;
        } else {
            self.invalid_rows = self.invalid_rows.saturating_sub(1);
        }
    }
}
