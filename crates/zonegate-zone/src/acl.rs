//! [`ZoneACL`]: the set of access rules attached to a [`crate::Zone`].
//!
//! Rule *authorization* semantics (which access levels exist, how they're
//! enforced) are an external collaborator's concern per the spec's
//! component design; this module owns only the set algebra — identity,
//! deduplication, copy-on-write insertion and removal — plus the narrow
//! per-rule shape validation every rule independently satisfies before it
//! can join the set.

use std::collections::BTreeSet;

use crate::error::ValidationError;

/// The access an ACL rule grants to a principal or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    /// Read-only access to the zone's records.
    Read,
    /// Read and modify the zone's records.
    Write,
    /// Modify the zone's records and its connections/ACL.
    Delete,
}

/// A single ACL entry: a principal or group id paired with the access level
/// it is granted. Identity for set membership is the full value — two rules
/// with the same subject and access level are the same rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneAclRule {
    /// Opaque user or group id this rule grants access to.
    pub subject_id: String,
    /// The access level granted.
    pub access_level: AccessLevel,
}

impl ZoneAclRule {
    /// Construct a rule, checking only the shape this core is responsible
    /// for: a non-empty subject id. Deeper authorization policy (does the
    /// subject exist, is it a user or a group) lives in the external
    /// repository this core does not depend on.
    ///
    /// # Errors
    ///
    /// Returns a single [`ValidationError`] if `subject_id` is empty.
    pub fn new(subject_id: impl Into<String>, access_level: AccessLevel) -> Result<Self, ValidationError> {
        let subject_id = subject_id.into();
        if subject_id.is_empty() {
            return Err(ValidationError::new("subjectId", "must not be empty"));
        }
        Ok(Self { subject_id, access_level })
    }
}

/// An immutable set of [`ZoneAclRule`]s.
///
/// `BTreeSet` gives deduplication by rule identity and a stable iteration
/// order, which keeps [`crate::Zone`]'s `PartialEq`/`Debug` deterministic
/// across equal ACLs built by different code paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneAcl {
    rules: BTreeSet<ZoneAclRule>,
}

impl ZoneAcl {
    /// Build an ACL from raw rules, validating every one independently.
    ///
    /// # Errors
    ///
    /// Returns every rule's validation failure together; a single malformed
    /// rule does not prevent the others from being checked.
    pub fn new(rules: impl IntoIterator<Item = ZoneAclRule>) -> Self {
        Self { rules: rules.into_iter().collect() }
    }

    /// Validate raw `(subject_id, access_level)` pairs and build the ACL, or
    /// return every accumulated per-rule error.
    ///
    /// # Errors
    ///
    /// One [`ValidationError`] per invalid rule, path-prefixed
    /// `acl.rules[<index>]`.
    pub fn build(raw_rules: &[(String, AccessLevel)]) -> Result<Self, Vec<ValidationError>> {
        let mut rules = BTreeSet::new();
        let mut errors = Vec::new();
        for (index, (subject_id, access_level)) in raw_rules.iter().enumerate() {
            match ZoneAclRule::new(subject_id.clone(), *access_level) {
                Ok(rule) => {
                    rules.insert(rule);
                }
                Err(err) => errors.push(ValidationError::new(
                    format!("acl.rules[{index}].{}", err.field),
                    err.message,
                )),
            }
        }
        if errors.is_empty() { Ok(Self { rules }) } else { Err(errors) }
    }

    /// Borrow the current set of rules.
    #[must_use]
    pub fn rules(&self) -> &BTreeSet<ZoneAclRule> {
        &self.rules
    }

    /// Return a new ACL with `rule` inserted. Idempotent: inserting an
    /// already-present rule returns an ACL equal to `self`.
    #[must_use]
    pub fn add_rule(&self, rule: ZoneAclRule) -> Self {
        let mut rules = self.rules.clone();
        rules.insert(rule);
        Self { rules }
    }

    /// Return a new ACL with `rule` removed. Idempotent: removing an absent
    /// rule returns an ACL equal to `self`.
    #[must_use]
    pub fn delete_rule(&self, rule: &ZoneAclRule) -> Self {
        let mut rules = self.rules.clone();
        rules.remove(rule);
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(subject: &str) -> ZoneAclRule {
        ZoneAclRule::new(subject, AccessLevel::Read).unwrap()
    }

    #[test]
    fn test_rule_new_should_reject_empty_subject() {
        assert!(ZoneAclRule::new("", AccessLevel::Read).is_err());
    }

    #[test]
    fn test_add_rule_should_contain_the_added_rule() {
        let acl = ZoneAcl::default().add_rule(rule("group-a"));
        assert!(acl.rules().contains(&rule("group-a")));
    }

    #[test]
    fn test_add_rule_should_be_idempotent() {
        let acl = ZoneAcl::default().add_rule(rule("group-a"));
        let twice = acl.add_rule(rule("group-a"));
        assert_eq!(acl, twice);
    }

    #[test]
    fn test_add_then_delete_should_restore_original_set() {
        let original = ZoneAcl::default();
        let added = original.add_rule(rule("group-a"));
        let removed = added.delete_rule(&rule("group-a"));
        assert_eq!(removed.rules(), original.rules());
    }

    #[test]
    fn test_delete_absent_rule_should_be_a_no_op() {
        let acl = ZoneAcl::default().add_rule(rule("group-a"));
        let still = acl.delete_rule(&rule("group-b"));
        assert_eq!(acl, still);
    }

    #[test]
    fn test_build_should_accumulate_errors_for_every_invalid_rule() {
        let raw = vec![(String::new(), AccessLevel::Read), (String::new(), AccessLevel::Write)];
        let errors = ZoneAcl::build(&raw).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_build_should_succeed_and_deduplicate_identical_rules() {
        let raw = vec![
            ("group-a".to_owned(), AccessLevel::Read),
            ("group-a".to_owned(), AccessLevel::Read),
        ];
        let acl = ZoneAcl::build(&raw).unwrap();
        assert_eq!(acl.rules().len(), 1);
    }
}
