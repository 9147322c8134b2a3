//! Spending categories and their purpose.

use crate::transactions::TransactionKind;

/// Declares which transaction kinds a category may be used for.
///
/// The numeric discriminants are the values the remote store exchanges:
/// 0 = expense only, 1 = income only, 2 = both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryPurpose {
    #[default]
    Expense,
    Income,
    Both,
}

impl CategoryPurpose {
    /// Numeric value used by the remote store.
    #[must_use]
    pub fn as_number(self) -> i64 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
            Self::Both => 2,
        }
    }

    /// Maps a wire value back; anything outside the declared range falls
    /// back to the zero variant.
    #[must_use]
    pub fn from_number(value: i64) -> Self {
        match value {
            1 => Self::Income,
            2 => Self::Both,
            _ => Self::Expense,
        }
    }

    /// Whether the category may be referenced by a transaction of `kind`.
    #[must_use]
    pub fn allows(self, kind: TransactionKind) -> bool {
        match self {
            Self::Both => true,
            Self::Expense => kind == TransactionKind::Expense,
            Self::Income => kind == TransactionKind::Income,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::Both => "Both",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: i64,
    pub description: String,
    pub purpose: CategoryPurpose,
}

/// Categories usable for the given transaction kind.
///
/// Callers must recompute this whenever the kind changes and drop a selected
/// category that is no longer in the result; the engine never mutates
/// selection state.
#[must_use]
pub fn eligible_categories(kind: TransactionKind, categories: &[Category]) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.purpose.allows(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                description: "Groceries".to_string(),
                purpose: CategoryPurpose::Expense,
            },
            Category {
                id: 2,
                description: "Salary".to_string(),
                purpose: CategoryPurpose::Income,
            },
            Category {
                id: 3,
                description: "Transfers".to_string(),
                purpose: CategoryPurpose::Both,
            },
        ]
    }

    #[test]
    fn expense_kind_excludes_income_only_categories() {
        let categories = catalog();
        let eligible = eligible_categories(TransactionKind::Expense, &categories);
        let ids: Vec<i64> = eligible.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn income_kind_excludes_expense_only_categories() {
        let categories = catalog();
        let eligible = eligible_categories(TransactionKind::Income, &categories);
        let ids: Vec<i64> = eligible.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn purpose_wire_values_round_trip() {
        for purpose in [
            CategoryPurpose::Expense,
            CategoryPurpose::Income,
            CategoryPurpose::Both,
        ] {
            assert_eq!(CategoryPurpose::from_number(purpose.as_number()), purpose);
        }
    }

    #[test]
    fn out_of_range_purpose_falls_back_to_expense() {
        assert_eq!(CategoryPurpose::from_number(3), CategoryPurpose::Expense);
        assert_eq!(CategoryPurpose::from_number(-1), CategoryPurpose::Expense);
    }
}
