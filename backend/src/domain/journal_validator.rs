//! # Journal Entry Validation
//!
//! Gatekeeper for every journal entry write. A journal entry records when a
//! child arrived (income) and left (outcome), together with the escorting
//! parent. Before anything is persisted the full proposed field set, with the
//! stored record merged underneath it on updates, must satisfy:
//!
//! - income time and income escort are set together or not at all
//! - outcome time and outcome escort are set together or not at all
//! - a departure cannot be recorded without an arrival
//! - a departure cannot precede the arrival
//!
//! The checks are independent of each other and every violation is reported.
//! Nothing in here touches storage.

use super::models::{JournalEntryChanges, JournalEntryFields};

/// A broken journal entry invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JournalValidationError {
    #[error("income_time and income_escort must be provided together")]
    IncomePairMismatch,
    #[error("outcome_time and outcome_escort must be provided together")]
    OutcomePairMismatch,
    #[error("outcome_time cannot be earlier than income_time")]
    OutcomeBeforeIncome,
    #[error("outcome cannot be recorded without an income")]
    OutcomeWithoutIncome,
}

/// Check a complete proposed field set
pub fn validate(proposed: &JournalEntryFields) -> Result<(), Vec<JournalValidationError>> {
    let mut violations = Vec::new();

    if proposed.income_time.is_some() != proposed.income_escort.is_some() {
        violations.push(JournalValidationError::IncomePairMismatch);
    }

    if proposed.outcome_time.is_some() != proposed.outcome_escort.is_some() {
        violations.push(JournalValidationError::OutcomePairMismatch);
    }

    match (proposed.income_time, proposed.outcome_time) {
        (Some(income), Some(outcome)) if outcome < income => {
            violations.push(JournalValidationError::OutcomeBeforeIncome);
        }
        (None, Some(_)) => violations.push(JournalValidationError::OutcomeWithoutIncome),
        _ => {}
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Merge `changes` over `current` and validate the result.
///
/// For a new entry `current` is [`JournalEntryFields::empty`] for the
/// referenced child. On success the returned fields are ready to persist.
pub fn resolve(
    current: &JournalEntryFields,
    changes: &JournalEntryChanges,
) -> Result<JournalEntryFields, Vec<JournalValidationError>> {
    let proposed = current.merge(changes);
    validate(&proposed)?;
    Ok(proposed)
}
