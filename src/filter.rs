//! Filter clause storage and evaluation.
//!
//! A clause is a conjunction: every normal literal must be present in
//! the active tag set with a matching value, and the inverted check must
//! not hit. Clauses combine with OR — the first passing clause lets the
//! message through. With no clauses stored, everything proceeds.

use std::collections::BTreeMap;

use crate::tag::Tag;

/// A conjunction of required ("normal") and forbidden ("inverted") tag
/// conditions.
#[derive(Debug, Clone, Default)]
pub struct FilterClause {
    pub normal_literals: Vec<Tag>,
    pub inverted_literals: Vec<Tag>,
}

/// Clause storage keyed by id. A `BTreeMap` keeps evaluation order
/// deterministic: ascending id.
pub(crate) type ClauseStore = BTreeMap<u64, FilterClause>;

/// Decide whether a message with the given active tag set proceeds.
pub(crate) fn evaluate(clauses: &ClauseStore, active: &BTreeMap<String, Tag>) -> bool {
    if clauses.is_empty() {
        return true;
    }
    clauses.values().any(|clause| clause_passes(clause, active))
}

fn clause_passes(clause: &FilterClause, active: &BTreeMap<String, Tag>) -> bool {
    for literal in &clause.normal_literals {
        // The tag must be present with a matching value.
        match active.get(literal.key()) {
            Some(tag) if tag.matches(literal) => {}
            _ => return false,
        }
    }
    // Only the first inverted literal is ever consulted, whether or not
    // its key is present; any further inverted literals are dead. This
    // mirrors longstanding observed behavior and is pinned by test —
    // changing it would change filtering for clauses with more than one
    // inverted literal.
    if let Some(inverted) = clause.inverted_literals.first() {
        if let Some(tag) = active.get(inverted.key()) {
            if tag.matches(inverted) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{TagOperation, log_level};

    fn active(tags: &[Tag]) -> BTreeMap<String, Tag> {
        tags.iter()
            .map(|tag| (tag.key().to_string(), tag.clone()))
            .collect()
    }

    #[test]
    fn test_empty_store_passes_everything() {
        let clauses = ClauseStore::new();
        assert!(evaluate(&clauses, &active(&[])));
        assert!(evaluate(&clauses, &active(&[log_level("info")])));
    }

    #[test]
    fn test_vacuous_clause_passes() {
        let mut clauses = ClauseStore::new();
        clauses.insert(1, FilterClause::default());
        assert!(evaluate(&clauses, &active(&[])));
    }

    #[test]
    fn test_missing_key_fails_normal_literal() {
        let mut clauses = ClauseStore::new();
        clauses.insert(
            1,
            FilterClause {
                normal_literals: vec![log_level("error")],
                inverted_literals: Vec::new(),
            },
        );
        assert!(!evaluate(&clauses, &active(&[])));
        assert!(!evaluate(&clauses, &active(&[log_level("info")])));
        assert!(evaluate(&clauses, &active(&[log_level("error")])));
    }

    #[test]
    fn test_clauses_combine_with_or() {
        let mut clauses = ClauseStore::new();
        clauses.insert(
            1,
            FilterClause {
                normal_literals: vec![log_level("error")],
                inverted_literals: Vec::new(),
            },
        );
        clauses.insert(
            2,
            FilterClause {
                normal_literals: vec![Tag::str("color", "green")],
                inverted_literals: Vec::new(),
            },
        );
        assert!(evaluate(
            &clauses,
            &active(&[log_level("info"), Tag::str("color", "green")])
        ));
        assert!(!evaluate(
            &clauses,
            &active(&[log_level("info"), Tag::str("color", "red")])
        ));
    }

    #[test]
    fn test_relational_literal_matches_against_value() {
        let mut clauses = ClauseStore::new();
        clauses.insert(
            1,
            FilterClause {
                normal_literals: vec![
                    Tag::int("count", 100).with_operation(TagOperation::GreaterThan),
                ],
                inverted_literals: Vec::new(),
            },
        );
        assert!(!evaluate(&clauses, &active(&[Tag::int("count", 1)])));
        assert!(evaluate(&clauses, &active(&[Tag::int("count", 101)])));
    }

    #[test]
    fn test_inverted_literal_fails_clause_on_match() {
        let mut clauses = ClauseStore::new();
        clauses.insert(
            1,
            FilterClause {
                normal_literals: Vec::new(),
                inverted_literals: vec![Tag::str("color", "green")],
            },
        );
        assert!(!evaluate(&clauses, &active(&[Tag::str("color", "green")])));
        // Key present with a mismatched value: the clause passes.
        assert!(evaluate(&clauses, &active(&[Tag::str("color", "red")])));
        // Key absent entirely: the clause passes.
        assert!(evaluate(&clauses, &active(&[])));
    }

    #[test]
    fn test_only_first_inverted_literal_is_examined() {
        let mut clauses = ClauseStore::new();
        clauses.insert(
            1,
            FilterClause {
                normal_literals: Vec::new(),
                inverted_literals: vec![
                    Tag::str("color", "green"),
                    Tag::str("size", "small"),
                ],
            },
        );
        // The second inverted literal matches the active set, but only
        // the first is examined, so the clause still passes.
        assert!(evaluate(&clauses, &active(&[Tag::str("size", "small")])));
        // The first literal matching still fails the clause.
        assert!(!evaluate(
            &clauses,
            &active(&[Tag::str("color", "green"), Tag::str("size", "small")])
        ));
    }
}
