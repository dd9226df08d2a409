//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: a process-local store implementing every repository port
//! - **ids**: random UUID identifiers
//! - **password**: bcrypt hashing and verification
//! - **token**: HS256 bearer tokens
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod ids;
pub mod memory;
pub mod password;
pub mod persistence;
pub mod token;
