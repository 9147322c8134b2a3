//! Transaction primitives.

/// Whether a transaction spends or earns money.
///
/// The numeric discriminants are the values the remote store exchanges:
/// 0 = expense, 1 = income.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    /// Numeric value used by the remote store.
    #[must_use]
    pub fn as_number(self) -> i64 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
        }
    }

    /// Maps a wire value back; anything outside the declared range falls
    /// back to the zero variant.
    #[must_use]
    pub fn from_number(value: i64) -> Self {
        match value {
            1 => Self::Income,
            _ => Self::Expense,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

/// A transaction already accepted by the remote store.
///
/// Transactions are immutable once created; there is no update operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub person_id: i64,
}
