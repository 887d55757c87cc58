//! Blog entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use blog_core::domain::{Blog, NewBlog};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert a blog row joined with its author into the domain Blog.
pub fn to_domain((model, author): (Model, Option<super::user::Model>)) -> Blog {
    Blog {
        id: model.id,
        title: model.title,
        content: model.content,
        author_id: model.author_id,
        author_username: author.map(|u| u.username),
        created_at: model.created_at.into(),
        modified_at: model.modified_at.into(),
    }
}

/// Insert form: the id is left to the database sequence.
impl From<NewBlog> for ActiveModel {
    fn from(blog: NewBlog) -> Self {
        Self {
            id: NotSet,
            author_id: Set(blog.author_id),
            title: Set(blog.title),
            content: Set(blog.content),
            created_at: Set(blog.created_at.into()),
            modified_at: Set(blog.created_at.into()),
        }
    }
}

/// Update form: only the mutable columns are set.
impl From<Blog> for ActiveModel {
    fn from(blog: Blog) -> Self {
        Self {
            id: Unchanged(blog.id),
            author_id: NotSet,
            title: Set(blog.title),
            content: Set(blog.content),
            created_at: NotSet,
            modified_at: Set(blog.modified_at.into()),
        }
    }
}
