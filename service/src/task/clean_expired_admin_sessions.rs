//! [`CleanExpiredAdminSessions`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Delete, Perform, Start};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::admin::{session, Session},
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`CleanExpiredAdminSessions`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between expired [`Session`]s cleaning.
    pub interval: time::Duration,
}

/// [`Task`] for deleting expired admin [`Session`]s.
#[derive(Clone, Copy, Debug)]
pub struct CleanExpiredAdminSessions<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<CleanExpiredAdminSessions<Self>, Config>>>
    for Service<Db>
where
    CleanExpiredAdminSessions<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CleanExpiredAdminSessions<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CleanExpiredAdminSessions {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::CleanExpiredAdminSessions` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for CleanExpiredAdminSessions<Service<Db>>
where
    Db: Database<
        Delete<By<Session, session::ExpirationDateTime>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        self.service
            .database()
            .execute(Delete(By::new(session::ExpirationDateTime::now())))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Error of [`CleanExpiredAdminSessions`] execution.
pub type ExecutionError = Traced<database::Error>;
