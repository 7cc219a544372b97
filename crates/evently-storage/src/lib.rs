// Postgres storage layer with sqlx
//
// This crate owns the database handle, the row models, and password
// hashing. Uniqueness conflicts surface as typed errors so callers never
// have to check-then-insert.

pub mod models;
pub mod password;
pub mod repositories;

pub use models::*;
pub use repositories::{Database, StorageError};
