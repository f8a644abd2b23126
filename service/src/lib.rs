//! Business logic of the real estate agency: the city, building and unit
//! catalog, bilingual marketing content, buyer inquiries and the back office
//! admins managing all of them.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
#[cfg(all(test, feature = "postgres"))]
pub(crate) mod fake;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::time;

use common::operations::{By, Start};
use derive_more::Debug;

#[cfg(doc)]
use domain::admin::Session;
#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Duration an admin [`Session`] stays valid for.
    pub session_ttl: time::Duration,

    /// [`task::CleanExpiredAdminSessions`] configuration.
    pub clean_expired_admin_sessions: task::clean_expired_admin_sessions::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters, along with the
    /// [`task::Background`] running its [`Task`]s.
    pub fn new(config: Config, database: Db) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::CleanExpiredAdminSessions<Self>,
                        task::clean_expired_admin_sessions::Config,
                    >,
                >,
                Ok = (),
                Err: std::error::Error,
            > + Clone
            + 'static,
    {
        let this = Self::from_parts(config, database);

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("clean_expired_admin_sessions", async move {
            let config = svc.config().clean_expired_admin_sessions;
            svc.execute(Start(By::new(config))).await
        });

        (this, bg)
    }

    /// Creates a new [`Service`] out of the provided parameters without
    /// starting any [`Task`]s.
    pub(crate) fn from_parts(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }
}
