//! In-memory entity store - used when no database is configured, and in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Blog, BlogFilter, NewBlog, NewUser, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, BlogRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    blogs: BTreeMap<i64, Blog>,
    last_user_id: i64,
    last_blog_id: i64,
}

impl Tables {
    fn username_of(&self, user_id: i64) -> Option<String> {
        self.users.get(&user_id).map(|u| u.username.clone())
    }

    /// Blogs are stored with their author id only; usernames are resolved on read.
    fn resolved(&self, blog: &Blog) -> Blog {
        Blog {
            author_username: self.username_of(blog.author_id),
            ..blog.clone()
        }
    }
}

/// Shared tables behind the in-memory repositories.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn blogs(&self) -> InMemoryBlogRepository {
        InMemoryBlogRepository {
            store: self.clone(),
        }
    }
}

/// In-memory user repository.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

/// In-memory blog repository.
#[derive(Clone)]
pub struct InMemoryBlogRepository {
    store: InMemoryStore,
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        // Mirrors ON DELETE CASCADE on blogs.author_id
        tables.blogs.retain(|_, blog| blog.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Blog, i64> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.blogs.get(&id).map(|b| tables.resolved(b)))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.blogs.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, blog: NewBlog) -> Result<Blog, RepoError> {
        let mut tables = self.store.tables.write().await;

        if !tables.users.contains_key(&blog.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                blog.author_id
            )));
        }

        tables.last_blog_id += 1;
        let stored = Blog {
            id: tables.last_blog_id,
            title: blog.title,
            content: blog.content,
            author_id: blog.author_id,
            author_username: None,
            created_at: blog.created_at,
            modified_at: blog.created_at,
        };
        let resolved = tables.resolved(&stored);
        tables.blogs.insert(stored.id, stored);

        Ok(resolved)
    }

    async fn find(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .blogs
            .values()
            .filter(|b| filter.matches(b))
            .map(|b| tables.resolved(b))
            .collect())
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut tables = self.store.tables.write().await;

        let stored = tables.blogs.get_mut(&blog.id).ok_or(RepoError::NotFound)?;
        stored.title = blog.title;
        stored.content = blog.content;
        stored.modified_at = blog.modified_at;
        let stored = stored.clone();

        Ok(tables.resolved(&stored))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use blog_core::domain::{BlogContent, DateFilter, Principal};

    use super::*;

    async fn seeded() -> (InMemoryStore, User) {
        let store = InMemoryStore::new();
        let user = store
            .users()
            .insert(NewUser::new("testuser".to_string(), "hash".to_string()))
            .await
            .unwrap();
        (store, user)
    }

    fn new_blog(author: &User, title: &str) -> NewBlog {
        NewBlog::new(
            &author.principal(),
            BlogContent {
                title: title.to_string(),
                content: "content".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids_and_resolves_author() {
        let (store, user) = seeded().await;
        let blogs = store.blogs();

        let first = blogs.insert(new_blog(&user, "One")).await.unwrap();
        let second = blogs.insert(new_blog(&user, "Two")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.author_username.as_deref(), Some("testuser"));
        assert_eq!(first.created_at, first.modified_at);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_author() {
        let store = InMemoryStore::new();
        let ghost = Principal {
            user_id: 42,
            username: "ghost".to_string(),
        };
        let blog = NewBlog::new(
            &ghost,
            BlogContent {
                title: "T".to_string(),
                content: "C".to_string(),
            },
        );

        assert!(matches!(
            store.blogs().insert(blog).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint_violation() {
        let (store, _) = seeded().await;

        let result = store
            .users()
            .insert(NewUser::new("testuser".to_string(), "other".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_never_touches_author_or_created_at() {
        let (store, user) = seeded().await;
        let blogs = store.blogs();
        let original = blogs.insert(new_blog(&user, "Original")).await.unwrap();

        let mut tampered = original.clone();
        tampered.title = "Changed".to_string();
        tampered.author_id = 999;
        tampered.created_at = original.created_at - TimeDelta::days(3);
        tampered.modified_at = original.created_at + TimeDelta::seconds(1);

        let updated = blogs.update(tampered).await.unwrap();

        assert_eq!(updated.title, "Changed");
        assert_eq!(updated.author_id, user.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.modified_at > original.modified_at);
    }

    #[tokio::test]
    async fn test_find_filters_and_keeps_insertion_order() {
        let (store, user) = seeded().await;
        let other = store
            .users()
            .insert(NewUser::new("anotheruser".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let blogs = store.blogs();

        blogs.insert(new_blog(&user, "Test Blog")).await.unwrap();
        blogs.insert(new_blog(&other, "Another Test Blog")).await.unwrap();
        blogs.insert(new_blog(&user, "Cooking")).await.unwrap();

        let all = blogs.find(&BlogFilter::all()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mine = blogs
            .find(&BlogFilter::all().with_author(user.id))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|b| b.author_id == user.id));

        let titled = blogs
            .find(&BlogFilter::all().with_title("test"))
            .await
            .unwrap();
        assert_eq!(titled.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_creation_window() {
        let (store, user) = seeded().await;
        let blogs = store.blogs();

        let mut old = new_blog(&user, "Old");
        old.created_at = Utc.with_ymd_and_hms(2024, 2, 5, 8, 0, 0).unwrap();
        blogs.insert(old).await.unwrap();
        blogs.insert(new_blog(&user, "Fresh")).await.unwrap();

        let day = chrono::NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let window = DateFilter::On(day).window().unwrap();
        let found = blogs
            .find(&BlogFilter::all().created_within(window))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Old");
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let (store, user) = seeded().await;
        let blogs = store.blogs();
        let blog = blogs.insert(new_blog(&user, "Gone")).await.unwrap();

        blogs.delete(blog.id).await.unwrap();

        assert!(blogs.find_by_id(blog.id).await.unwrap().is_none());
        assert!(matches!(blogs.delete(blog.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_blogs() {
        let (store, user) = seeded().await;
        store.blogs().insert(new_blog(&user, "Mine")).await.unwrap();

        store.users().delete(user.id).await.unwrap();

        assert!(store.blogs().find(&BlogFilter::all()).await.unwrap().is_empty());
    }
}
