//! Transaction admission rules.
//!
//! The rules are an ordered table of named predicates; [`admit`] runs them
//! in order and returns the first violation. The table order is load-bearing:
//! it fixes the precedence between the minor-income restriction and the
//! category compatibility check, and reports a missing category before a
//! missing person when both selections are absent.

use crate::{
    amount,
    categories::Category,
    error::RuleViolation,
    people::Person,
    transactions::TransactionKind,
};

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 400;

/// Raw form input for a proposed transaction.
///
/// Description and amount arrive untrimmed/unparsed exactly as typed;
/// selections are optional because the form may not have them yet.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub description: &'a str,
    pub amount: &'a str,
    pub kind: TransactionKind,
    pub category_id: Option<i64>,
    pub person_id: Option<i64>,
}

/// Snapshot of the reference data the rules consult.
#[derive(Clone, Copy, Debug)]
pub struct Catalog<'a> {
    pub people: &'a [Person],
    pub categories: &'a [Category],
}

impl<'a> Catalog<'a> {
    pub fn person(&self, id: i64) -> Option<&'a Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&'a Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// A named admission predicate; returns the violation, if any.
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&Candidate<'_>, &Catalog<'_>) -> Option<RuleViolation>,
}

/// Admission rules in evaluation order.
pub const ADMISSION_RULES: &[Rule] = &[
    Rule {
        name: "description",
        check: description_within_limits,
    },
    Rule {
        name: "amount",
        check: amount_positive,
    },
    Rule {
        name: "category-selected",
        check: category_selected,
    },
    Rule {
        name: "person-selected",
        check: person_selected,
    },
    Rule {
        name: "minor-income",
        check: minor_income_restricted,
    },
    Rule {
        name: "category-compatible",
        check: category_compatible,
    },
];

/// The normalized form of an admitted candidate: trimmed description,
/// parsed amount, resolved selections. This is exactly what gets sent to
/// the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Admitted {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub person_id: i64,
}

/// Decides whether a candidate transaction is admissible.
///
/// Pure: no I/O and no mutation of the catalog. Deterministic: the first
/// failing rule in [`ADMISSION_RULES`] order is the one reported.
pub fn admit(
    candidate: &Candidate<'_>,
    catalog: &Catalog<'_>,
) -> Result<Admitted, RuleViolation> {
    for rule in ADMISSION_RULES {
        if let Some(violation) = (rule.check)(candidate, catalog) {
            return Err(violation);
        }
    }

    // The rules above guarantee these conversions succeed.
    let amount =
        amount::parse_amount(candidate.amount).map_err(|_| RuleViolation::InvalidAmount)?;
    let category_id = candidate.category_id.ok_or(RuleViolation::CategoryMissing)?;
    let person_id = candidate.person_id.ok_or(RuleViolation::PersonMissing)?;

    Ok(Admitted {
        description: candidate.description.trim().to_string(),
        amount,
        kind: candidate.kind,
        category_id,
        person_id,
    })
}

fn description_within_limits(
    candidate: &Candidate<'_>,
    _catalog: &Catalog<'_>,
) -> Option<RuleViolation> {
    let trimmed = candidate.description.trim();
    if trimmed.is_empty() {
        return Some(RuleViolation::DescriptionMissing);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Some(RuleViolation::DescriptionTooLong(MAX_DESCRIPTION_LEN));
    }
    None
}

fn amount_positive(candidate: &Candidate<'_>, _catalog: &Catalog<'_>) -> Option<RuleViolation> {
    amount::parse_amount(candidate.amount)
        .err()
        .map(|_| RuleViolation::InvalidAmount)
}

fn category_selected(candidate: &Candidate<'_>, _catalog: &Catalog<'_>) -> Option<RuleViolation> {
    candidate
        .category_id
        .is_none()
        .then_some(RuleViolation::CategoryMissing)
}

fn person_selected(candidate: &Candidate<'_>, _catalog: &Catalog<'_>) -> Option<RuleViolation> {
    candidate
        .person_id
        .is_none()
        .then_some(RuleViolation::PersonMissing)
}

/// An unresolved person id passes: no age policy applies to an unknown
/// payer, the store is the authority on whether it exists.
fn minor_income_restricted(
    candidate: &Candidate<'_>,
    catalog: &Catalog<'_>,
) -> Option<RuleViolation> {
    let person = candidate.person_id.and_then(|id| catalog.person(id))?;
    (person.income_blocked() && candidate.kind == TransactionKind::Income)
        .then_some(RuleViolation::MinorIncomeRestricted)
}

fn category_compatible(
    candidate: &Candidate<'_>,
    catalog: &Catalog<'_>,
) -> Option<RuleViolation> {
    let id = candidate.category_id?;
    let Some(category) = catalog.category(id) else {
        return Some(RuleViolation::UnknownCategory);
    };
    (!category.purpose.allows(candidate.kind))
        .then_some(RuleViolation::CategoryKindMismatch(candidate.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryPurpose;

    fn people() -> Vec<Person> {
        vec![
            Person {
                id: 1,
                name: "Ana".to_string(),
                age: 16,
            },
            Person {
                id: 2,
                name: "Bruno".to_string(),
                age: 34,
            },
        ]
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 10,
                description: "Mesada".to_string(),
                purpose: CategoryPurpose::Income,
            },
            Category {
                id: 11,
                description: "Mercado".to_string(),
                purpose: CategoryPurpose::Expense,
            },
            Category {
                id: 12,
                description: "Geral".to_string(),
                purpose: CategoryPurpose::Both,
            },
        ]
    }

    fn candidate<'a>(
        kind: TransactionKind,
        category_id: Option<i64>,
        person_id: Option<i64>,
    ) -> Candidate<'a> {
        Candidate {
            description: "x",
            amount: "50",
            kind,
            category_id,
            person_id,
        }
    }

    #[test]
    fn admits_a_valid_expense() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = Candidate {
            description: "  market run  ",
            amount: "30,5",
            kind: TransactionKind::Expense,
            category_id: Some(11),
            person_id: Some(1),
        };

        let admitted = admit(&candidate, &catalog).unwrap();
        assert_eq!(admitted.description, "market run");
        assert_eq!(admitted.amount, 30.5);
        assert_eq!(admitted.category_id, 11);
        assert_eq!(admitted.person_id, 1);
    }

    #[test]
    fn rejects_income_for_a_minor() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        // Mesada is a perfectly valid income category; the minor rule still
        // has to win.
        let candidate = candidate(TransactionKind::Income, Some(10), Some(1));

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::MinorIncomeRestricted)
        );
    }

    #[test]
    fn minor_rule_takes_precedence_over_category_mismatch() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        // Income against an expense-only category by a minor: both rules
        // fail, the minor restriction must be the one reported.
        let candidate = candidate(TransactionKind::Income, Some(11), Some(1));

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::MinorIncomeRestricted)
        );
    }

    #[test]
    fn adult_income_against_expense_category_is_a_mismatch() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = candidate(TransactionKind::Income, Some(11), Some(2));

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::CategoryKindMismatch(TransactionKind::Income))
        );
    }

    #[test]
    fn both_purpose_category_is_compatible_with_either_kind() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };

        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            let candidate = candidate(kind, Some(12), Some(2));
            assert!(admit(&candidate, &catalog).is_ok());
        }
    }

    #[test]
    fn missing_category_is_reported_before_missing_person() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = candidate(TransactionKind::Expense, None, None);

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::CategoryMissing)
        );
    }

    #[test]
    fn missing_person_is_reported_when_category_is_selected() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = candidate(TransactionKind::Expense, Some(11), None);

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::PersonMissing)
        );
    }

    #[test]
    fn unknown_person_passes_the_minor_rule() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = candidate(TransactionKind::Income, Some(10), Some(999));

        assert!(admit(&candidate, &catalog).is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = candidate(TransactionKind::Expense, Some(999), Some(2));

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::UnknownCategory)
        );
    }

    #[test]
    fn blank_description_is_rejected_first() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = Candidate {
            description: "   ",
            amount: "not a number",
            kind: TransactionKind::Expense,
            category_id: None,
            person_id: None,
        };

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::DescriptionMissing)
        );
    }

    #[test]
    fn overlong_description_is_rejected() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let candidate = Candidate {
            description: &description,
            amount: "10",
            kind: TransactionKind::Expense,
            category_id: Some(11),
            person_id: Some(2),
        };

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::DescriptionTooLong(MAX_DESCRIPTION_LEN))
        );
    }

    #[test]
    fn invalid_amount_is_rejected_before_selections() {
        let people = people();
        let categories = categories();
        let catalog = Catalog {
            people: &people,
            categories: &categories,
        };
        let candidate = Candidate {
            description: "x",
            amount: "zero",
            kind: TransactionKind::Expense,
            category_id: None,
            person_id: None,
        };

        assert_eq!(
            admit(&candidate, &catalog),
            Err(RuleViolation::InvalidAmount)
        );
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let names: Vec<&str> = ADMISSION_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            vec![
                "description",
                "amount",
                "category-selected",
                "person-selected",
                "minor-income",
                "category-compatible",
            ]
        );
    }
}
