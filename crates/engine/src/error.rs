//! The module contains the error the admission rules can throw.
//!
//! Every variant's `Display` text is the message surfaced verbatim to the
//! user; a single [`admit`] call reports the first failing rule only.
//!
//! [`admit`]: crate::admit

use thiserror::Error;

use crate::transactions::TransactionKind;

/// Reasons a candidate transaction is rejected before it reaches the store.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("description is required")]
    DescriptionMissing,
    #[error("description must be at most {0} characters")]
    DescriptionTooLong(usize),
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("select a category")]
    CategoryMissing,
    #[error("select a person")]
    PersonMissing,
    #[error("minors can only register expenses")]
    MinorIncomeRestricted,
    #[error("unknown category")]
    UnknownCategory,
    #[error("category is not compatible with {} transactions", .0.label())]
    CategoryKindMismatch(TransactionKind),
}
