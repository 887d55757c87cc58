//! Mapping between stored blogs and their JSON form.
//!
//! Inbound bodies never carry an author: the creating principal is attached
//! by the handler. Outbound, the author is rendered as a username.

use blog_core::DomainError;
use blog_core::domain::{Blog, BlogContent, BlogPatch};
use blog_shared::dto::{BlogRequest, BlogResponse};

pub fn to_response(blog: Blog) -> BlogResponse {
    BlogResponse {
        id: blog.id,
        title: blog.title,
        content: blog.content,
        created_at: blog.created_at,
        modified_at: blog.modified_at,
        author: blog.author_username,
    }
}

pub fn to_responses(blogs: Vec<Blog>) -> Vec<BlogResponse> {
    blogs.into_iter().map(to_response).collect()
}

/// Full body, as required by create and PUT.
pub fn content_from(req: BlogRequest) -> Result<BlogContent, DomainError> {
    BlogContent::parse(req.title, req.content)
}

/// Partial body, as accepted by PATCH.
pub fn patch_from(req: BlogRequest) -> Result<BlogPatch, DomainError> {
    BlogPatch::parse(req.title, req.content)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_author_is_rendered_as_username() {
        let now = Utc::now();
        let response = to_response(Blog {
            id: 3,
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: 11,
            author_username: Some("admin1".to_string()),
            created_at: now,
            modified_at: now,
        });

        assert_eq!(response.author.as_deref(), Some("admin1"));
        assert_eq!(response.id, 3);
    }

    #[test]
    fn test_content_requires_both_fields() {
        let err = content_from(BlogRequest {
            title: Some("Only title".to_string()),
            content: None,
        })
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_patch_accepts_empty_body() {
        assert_eq!(patch_from(BlogRequest::default()).unwrap(), BlogPatch::default());
    }
}
