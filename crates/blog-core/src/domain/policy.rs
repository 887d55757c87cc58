//! Ownership policy for blog mutations.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::blog::Blog;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

/// Whether `principal` authored `blog`.
pub fn is_owner(principal: &Principal, blog: &Blog) -> bool {
    principal.user_id == blog.author_id
}

/// Outcome of checking a caller against a record before update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Proceed,
    Unauthenticated,
    Forbidden,
}

impl Access {
    pub fn evaluate(principal: Option<&Principal>, blog: &Blog) -> Self {
        match principal {
            None => Access::Unauthenticated,
            Some(p) if is_owner(p, blog) => Access::Proceed,
            Some(_) => Access::Forbidden,
        }
    }

    /// Convert a denial into the matching domain error. `action` names the
    /// attempted verb for the message ("update", "delete").
    pub fn into_result(self, action: &str) -> Result<(), DomainError> {
        match self {
            Access::Proceed => Ok(()),
            Access::Unauthenticated => Err(DomainError::Unauthorized),
            Access::Forbidden => Err(DomainError::Forbidden(format!(
                "You do not have permission to {action} this blog."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn blog_by(author_id: i64) -> Blog {
        let now = Utc::now();
        Blog {
            id: 1,
            title: "Title".to_string(),
            content: "Content".to_string(),
            author_id,
            author_username: Some("admin1".to_string()),
            created_at: now,
            modified_at: now,
        }
    }

    fn principal(user_id: i64) -> Principal {
        Principal {
            user_id,
            username: format!("user{user_id}"),
        }
    }

    #[test]
    fn test_owner_proceeds() {
        let owner = principal(1);
        assert!(is_owner(&owner, &blog_by(1)));
        assert_eq!(Access::evaluate(Some(&owner), &blog_by(1)), Access::Proceed);
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let other = principal(2);
        assert!(!is_owner(&other, &blog_by(1)));
        assert_eq!(Access::evaluate(Some(&other), &blog_by(1)), Access::Forbidden);
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        assert_eq!(Access::evaluate(None, &blog_by(1)), Access::Unauthenticated);
    }

    #[test]
    fn test_into_result_maps_denials() {
        assert!(Access::Proceed.into_result("update").is_ok());
        assert!(matches!(
            Access::Unauthenticated.into_result("update"),
            Err(DomainError::Unauthorized)
        ));
        match Access::Forbidden.into_result("delete") {
            Err(DomainError::Forbidden(msg)) => {
                assert_eq!(msg, "You do not have permission to delete this blog.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
