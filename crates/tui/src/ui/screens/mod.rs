pub mod categories;
pub mod people;
pub mod reports;
pub mod transactions;
