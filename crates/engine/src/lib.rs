pub use amount::{AmountError, parse_amount};
pub use categories::{Category, CategoryPurpose, eligible_categories};
pub use error::RuleViolation;
pub use people::{ADULT_AGE, Person};
pub use rules::{ADMISSION_RULES, Admitted, Candidate, Catalog, MAX_DESCRIPTION_LEN, Rule, admit};
pub use transactions::{Transaction, TransactionKind};

mod amount;
mod categories;
mod error;
mod people;
mod rules;
mod transactions;
