//! Domain entities - the core business objects.

mod blog;
mod filter;
mod policy;
mod user;

pub use blog::{Blog, BlogContent, BlogPatch, NewBlog, TITLE_MAX_LEN};
pub use filter::{BlogFilter, CreatedWindow, DATE_FORMAT, DateFilter, parse_date};
pub use policy::{Access, Principal, is_owner};
pub use user::{NewUser, User};
