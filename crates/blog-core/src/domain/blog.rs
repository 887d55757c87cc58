use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

use super::policy::Principal;

/// Longest title accepted, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Blog entity - a post owned by the user that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    /// Resolved from the author reference on read; `None` if the user row is gone.
    pub author_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Blog {
    /// Replace title and content, refreshing `modified_at`.
    pub fn apply(&mut self, content: BlogContent, now: DateTime<Utc>) {
        self.title = content.title;
        self.content = content.content;
        self.touch(now);
    }

    /// Apply whichever fields the patch carries, refreshing `modified_at`.
    pub fn patch(&mut self, patch: BlogPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.touch(now);
    }

    /// `modified_at` never falls behind `created_at`, even if the clock steps back.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now.max(self.created_at);
    }
}

/// A blog about to be inserted. The store assigns the id.
///
/// The author is taken from the authenticated principal, never from the
/// request payload.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewBlog {
    pub fn new(author: &Principal, content: BlogContent) -> Self {
        Self {
            author_id: author.user_id,
            title: content.title,
            content: content.content,
            created_at: Utc::now(),
        }
    }
}

/// Validated title and content, as required by create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogContent {
    pub title: String,
    pub content: String,
}

impl BlogContent {
    /// Both fields must be present and non-blank. Surrounding whitespace is trimmed.
    pub fn parse(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        let mut errors = Vec::new();
        let title = required("title", title, &mut errors);
        let content = required("content", content, &mut errors);
        if let Some(title) = &title {
            check_title_len(title, &mut errors);
        }

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(Self { title, content }),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

/// Validated partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl BlogPatch {
    /// Fields that are present must be non-blank.
    pub fn parse(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        let mut errors = Vec::new();
        let title = title.and_then(|t| required("title", Some(t), &mut errors));
        let content = content.and_then(|c| required("content", Some(c), &mut errors));
        if let Some(title) = &title {
            check_title_len(title, &mut errors);
        }

        if errors.is_empty() {
            Ok(Self { title, content })
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

fn required(field: &str, value: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        None => {
            errors.push(format!("{field}: This field is required."));
            None
        }
        Some("") => {
            errors.push(format!("{field}: This field may not be blank."));
            None
        }
        Some(trimmed) => Some(trimmed.to_string()),
    }
}

fn check_title_len(title: &str, errors: &mut Vec<String>) {
    if title.chars().count() > TITLE_MAX_LEN {
        errors.push(format!(
            "title: Ensure this field has no more than {TITLE_MAX_LEN} characters."
        ));
    }
}
