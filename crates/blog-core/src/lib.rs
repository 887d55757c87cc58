//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the `Blog` and `User` entities, the ownership policy guarding mutations,
//! date filter parsing, and the ports infrastructure must implement.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
