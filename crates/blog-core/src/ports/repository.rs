use async_trait::async_trait;

use crate::domain::{Blog, BlogFilter, NewBlog, NewUser, User};
use crate::error::RepoError;

/// Operations shared by every repository.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Permanently delete an entity. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Insert a user. `RepoError::Constraint` if the username is taken.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Blog repository - the entity store behind every blog endpoint.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, i64> {
    /// Insert a blog, assigning its id. `modified_at` starts equal to `created_at`.
    async fn insert(&self, blog: NewBlog) -> Result<Blog, RepoError>;

    /// All blogs matching `filter`, in insertion (id) order.
    async fn find(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError>;

    /// Persist `title`, `content` and `modified_at`. Author and creation
    /// time are never written after insert.
    async fn update(&self, blog: Blog) -> Result<Blog, RepoError>;
}
