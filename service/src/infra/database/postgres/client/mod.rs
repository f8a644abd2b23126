//! Postgres database client definitions.

pub mod pooled;

pub use self::pooled::Pooled;
