//! Row-level authorization for user-owned records.
//!
//! Every journal record belongs to one user, except system categories
//! which are visible to everyone. Access checks never reveal whether a
//! record owned by someone else exists: a foreign record is reported with
//! the same not-found code as a missing one.
//!
//! # Example
//!
//! ```ignore
//! let decision = repo.find_by_id(id).await?
//!     .ok_or_else(|| DecisionError::not_found())?;
//! decision.check_ownership(&metadata.user_id)?; // NotFound if foreign
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for records that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record.
    fn owner_id(&self) -> &UserId;

    /// Error code used when the caller may not see this record.
    fn not_found_code() -> ErrorCode
    where
        Self: Sized;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, concealing foreign records as not found.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError>
    where
        Self: Sized,
    {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(Self::not_found_code(), "Record not found"))
        }
    }
}

/// Trait for records that are either shared system rows or owned by one user.
pub trait VisibleTo {
    /// Owner of the record, `None` for system rows.
    fn owner(&self) -> Option<&UserId>;

    /// System rows are visible to all users; owned rows only to their owner.
    fn is_visible_to(&self, user_id: &UserId) -> bool {
        match self.owner() {
            None => true,
            Some(owner) => owner == user_id,
        }
    }

    /// True when `user_id` may modify this record (system rows are read-only).
    fn is_editable_by(&self, user_id: &UserId) -> bool {
        self.owner() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRecord {
        owner: UserId,
    }

    impl OwnedByUser for TestRecord {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }

        fn not_found_code() -> ErrorCode {
            ErrorCode::DecisionNotFound
        }
    }

    struct TestShared {
        owner: Option<UserId>,
    }

    impl VisibleTo for TestShared {
        fn owner(&self) -> Option<&UserId> {
            self.owner.as_ref()
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn check_ownership_succeeds_for_owner() {
        let record = TestRecord { owner: user("a") };
        assert!(record.check_ownership(&user("a")).is_ok());
    }

    #[test]
    fn check_ownership_reports_not_found_for_foreign_user() {
        let record = TestRecord { owner: user("a") };
        let err = record.check_ownership(&user("b")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
        assert!(err.details.is_empty(), "must not leak the owner");
    }

    #[test]
    fn system_rows_are_visible_but_not_editable() {
        let shared = TestShared { owner: None };
        assert!(shared.is_visible_to(&user("a")));
        assert!(!shared.is_editable_by(&user("a")));
    }

    #[test]
    fn owned_rows_are_private() {
        let owned = TestShared {
            owner: Some(user("a")),
        };
        assert!(owned.is_visible_to(&user("a")));
        assert!(owned.is_editable_by(&user("a")));
        assert!(!owned.is_visible_to(&user("b")));
    }
}
