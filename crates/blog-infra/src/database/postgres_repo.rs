//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{Blog, BlogFilter, NewBlog, NewUser, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, BlogRepository, UserRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog repository.
pub type PostgresBlogRepository = PostgresBaseRepository<BlogEntity>;

#[async_trait]
impl BaseRepository<User, i64> for PostgresUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl BaseRepository<Blog, i64> for PostgresBlogRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, RepoError> {
        let result = BlogEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(blog::to_domain))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn insert(&self, blog: NewBlog) -> Result<Blog, RepoError> {
        let active: blog::ActiveModel = blog.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        let author = UserEntity::find_by_id(model.author_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(blog::to_domain((model, author)))
    }

    async fn find(&self, filter: &BlogFilter) -> Result<Vec<Blog>, RepoError> {
        tracing::debug!(?filter, "Querying blogs");

        let mut query = BlogEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(blog::Column::Id);

        if let Some(author_id) = filter.author_id {
            query = query.filter(blog::Column::AuthorId.eq(author_id));
        }
        if let Some(title) = &filter.title {
            let title_lower = Func::lower(Expr::col((BlogEntity, blog::Column::Title)));
            query = query.filter(
                Expr::expr(title_lower).like(LikeExpr::new(contains_pattern(title)).escape('\\')),
            );
        }
        if let Some(window) = filter.created {
            if let Some(from) = window.from {
                query = query.filter(blog::Column::CreatedAt.gte(from));
            }
            if let Some(until) = window.until {
                query = query.filter(blog::Column::CreatedAt.lt(until));
            }
        }

        let rows = query.all(&self.db).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(blog::to_domain).collect())
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        let author_username = blog.author_username.clone();
        let active: blog::ActiveModel = blog.into();
        let model = active.update(&self.db).await.map_err(map_db_err)?;

        let mut updated = blog::to_domain((model, None));
        updated.author_username = author_username;
        Ok(updated)
    }
}

/// Lower-cased `LIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Test"), "%test%");
        assert_eq!(contains_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
