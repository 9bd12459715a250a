//! Caller context passed to every handler.
//!
//! The caller identity travels here explicitly; there is no ambient
//! "current user" anywhere in the crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Who is calling, plus the request id their log lines share.
///
/// Bulk handlers clone one metadata value for every id they touch, so all
/// per-decision log lines of a bulk request carry the same request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Owner every read and write is scoped to.
    pub user_id: UserId,

    request_id: String,
}

impl CommandMetadata {
    /// Metadata for `user_id` with a freshly generated request id.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Reuses a request id issued upstream, e.g. by the HTTP layer.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = id.into();
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Metadata for `user` with a fixed request id.
    pub fn test_fixture(user: &str) -> Self {
        Self::new(UserId::new(user).unwrap()).with_request_id("test-request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_a_request_id() {
        let user_id = UserId::new("user-123").unwrap();
        let first = CommandMetadata::new(user_id.clone());
        let second = CommandMetadata::new(user_id.clone());

        assert_eq!(first.user_id, user_id);
        assert!(!first.request_id().is_empty());
        assert_ne!(first.request_id(), second.request_id());
    }

    #[test]
    fn upstream_request_id_is_kept() {
        let metadata =
            CommandMetadata::new(UserId::new("user").unwrap()).with_request_id("req-42");
        assert_eq!(metadata.request_id(), "req-42");
    }

    #[test]
    fn clones_share_the_request_id() {
        let metadata = CommandMetadata::test_fixture("alice");
        assert_eq!(metadata.clone().request_id(), "test-request");
        assert_eq!(metadata.user_id.as_str(), "alice");
    }

    #[test]
    fn serializes_owner_and_request_id() {
        let metadata = CommandMetadata::test_fixture("user-json");

        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["user_id"], "user-json");
        assert_eq!(json["request_id"], "test-request");
    }
}
