//! SeaORM entities mirroring the `users` and `blogs` tables.

pub mod blog;
pub mod user;
