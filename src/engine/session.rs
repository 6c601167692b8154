use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::engine::{Action, Confirmation, ExclusionOutcome, Transition};
use crate::models::{ImportSummary, ImportedRow};
use crate::types::RowNumber;

/// Client-local view of one uploaded row batch.
///
/// Rows may be excluded before commit. The summary is adjusted in place on
/// every exclusion so that it keeps matching the active rows without another
/// round trip to the upload service.
#[derive(Debug, Clone, Default)]
pub struct ImportSession {
    rows: Vec<ImportedRow>,
    summary: Option<ImportSummary>,
    /// Excluded row numbers in the order they were removed.
    excluded: IndexSet<RowNumber>,
    preview_visible: bool,
    pending: Option<Confirmation>
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ImportedRow] {
        &self.rows
    }

    pub fn summary(&self) -> Option<&ImportSummary> {
        self.summary.as_ref()
    }

    pub fn excluded_rows(&self) -> impl Iterator<Item = RowNumber> + '_ {
        self.excluded.iter().copied()
    }

    pub fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    pub fn is_preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row_number: RowNumber) -> bool {
        self.position(row_number).is_some()
    }

    /// Single entry point for UI events; every other mutator is reachable from here.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        match action {
            Action::LoadBatch { rows, summary } => {
                self.load_batch(rows, summary);
                Transition::Loaded { rows: self.rows.len() }
            },
            Action::RequestExclusion { row_number, house_no } => {
                match self.request_exclusion(row_number, &house_no) {
                    Some(confirmation) => Transition::ConfirmationRequested(confirmation),
                    None => Transition::Unchanged
                }
            },
            Action::ConfirmExclusion => match self.pending.take() {
                Some(confirmation) => Transition::Excluded(self.confirm_exclusion(&confirmation)),
                None => Transition::Unchanged
            },
            Action::CancelExclusion => {
                if self.cancel_exclusion() {
                    Transition::Cancelled
                } else {
                    Transition::Unchanged
                }
            },
            Action::Reset => {
                self.reset();
                Transition::Cleared
            }
        }
    }

    /// Replaces any prior batch with a freshly uploaded one.
    pub fn load_batch(&mut self, rows: Vec<ImportedRow>, mut summary: ImportSummary) {
        let mut seen = HashSet::with_capacity(rows.len());
        let mut unique = Vec::with_capacity(rows.len());

        for row in rows {
            if seen.insert(row.row_number) {
                unique.push(row);
            } else {
                warn!("Dropping duplicate row [{}] for house [{}] from upload", row.row_number, row.house_no);
                summary.subtract(&row);
            }
        }

        info!("Loaded import batch with {} rows", unique.len());

        self.rows = unique;
        self.summary = Some(summary);
        self.excluded.clear();
        self.pending = None;
        self.preview_visible = true;
    }

    /// First phase of an exclusion. Returns `None` when the row is not active.
    pub fn request_exclusion(&mut self, row_number: RowNumber, house_no: &str) -> Option<Confirmation> {
        let Some(index) = self.position(row_number) else {
            debug!("Exclusion requested for row [{row_number}] which is not in the batch");
            return None;
        };

        let row = &self.rows[index];

        if row.house_no != house_no {
            debug!("Exclusion for row [{row_number}] named house [{house_no}], batch has [{}]", row.house_no);
        }

        let confirmation = Confirmation {
            row_number,
            house_no: row.house_no.clone()
        };

        self.pending = Some(confirmation.clone());

        Some(confirmation)
    }

    /// Second phase of an exclusion: removes the row and adjusts the summary.
    pub fn confirm_exclusion(&mut self, confirmation: &Confirmation) -> ExclusionOutcome {
        if self.pending.as_ref() == Some(confirmation) {
            self.pending = None;
        }

        self.remove_row(confirmation.row_number)
    }

    /// Drops a pending confirmation. Returns whether one was pending.
    pub fn cancel_exclusion(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Excludes without the confirmation step. A confirmation pending for
    /// another row is left in place.
    pub fn exclude_row(&mut self, row_number: RowNumber, house_no: &str) -> ExclusionOutcome {
        if let Some(row) = self.rows.iter().find(|row| row.row_number == row_number) {
            if row.house_no != house_no {
                debug!("Exclusion for row [{row_number}] named house [{house_no}], batch has [{}]", row.house_no);
            }
        }

        self.remove_row(row_number)
    }

    /// Comma-joined excluded row numbers, as the commit endpoint expects them.
    pub fn exclusion_list(&self) -> String {
        self.excluded.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.summary = None;
        self.excluded.clear();
        self.pending = None;
        self.preview_visible = false;
    }

    fn remove_row(&mut self, row_number: RowNumber) -> ExclusionOutcome {
        let Some(index) = self.position(row_number) else {
            debug!("Row [{row_number}] is not in the batch, nothing to exclude");
            return ExclusionOutcome::Unchanged;
        };

        if self.rows.len() == 1 {
            info!("Last row [{row_number}] excluded, resetting import batch");
            self.reset();
            return ExclusionOutcome::BatchEmptied;
        }

        let row = self.rows.remove(index);
        self.excluded.insert(row.row_number);

        if let Some(summary) = self.summary.as_mut() {
            summary.subtract(&row);
        }

        debug!("Row [{}] for house [{}] excluded, {} rows remain", row.row_number, row.house_no, self.rows.len());

        ExclusionOutcome::RowExcluded {
            row_number: row.row_number,
            remaining: self.rows.len()
        }
    }

    fn position(&self, row_number: RowNumber) -> Option<usize> {
        self.rows.iter().position(|row| row.row_number == row_number)
    }
}
