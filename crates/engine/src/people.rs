//! Registered payers.

/// Age at which the income restriction stops applying.
pub const ADULT_AGE: u32 = 18;

/// A person who can be referenced as the payer of a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: u32,
}

impl Person {
    /// Income transactions are disallowed for minors.
    #[must_use]
    pub fn income_blocked(&self) -> bool {
        self.age < ADULT_AGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minors_are_income_blocked() {
        let person = Person {
            id: 1,
            name: "Ana".to_string(),
            age: 16,
        };
        assert!(person.income_blocked());
    }

    #[test]
    fn adults_are_not_income_blocked() {
        let person = Person {
            id: 2,
            name: "Bruno".to_string(),
            age: 18,
        };
        assert!(!person.income_blocked());
    }
}
