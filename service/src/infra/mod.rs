//! Infrastructure layer: storage the [`Service`] reads and writes catalog,
//! content and admin data through.
//!
//! [`Service`]: crate::Service

pub mod database;

pub use self::database::Database;
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
