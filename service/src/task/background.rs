//! [`Background`] environment running long-lived [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _,
};
use tokio::task;
use tracing as log;

#[cfg(doc)]
use crate::Task;

/// Error of a [`Task`] running in the [`Background`].
pub type TaskError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s on a single thread.
///
/// Resolves once every spawned [`Task`] finishes, or as soon as any of them
/// fails.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set the [`Task`]s are spawned onto.
    set: task::LocalSet,

    /// Names and handles of the spawned [`Task`]s.
    tasks: Vec<(&'static str, task::JoinHandle<Result<(), TaskError>>)>,
}

impl Background {
    /// Spawns a new [`Task`] with the provided `name` inside this
    /// [`Background`].
    pub fn spawn<F, E>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        log::debug!("spawning `{name}` background task");
        let handle = self
            .set
            .spawn_local(future.map(|r| r.map_err(|e| TaskError::from(e))));
        self.tasks.push((name, handle));
    }

    /// Returns the number of [`Task`]s spawned in this [`Background`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Indicates whether no [`Task`]s were spawned in this [`Background`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), TaskError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, tasks } = self;

        let tasks = tasks.into_iter().map(|(name, handle)| {
            handle
                .map(move |res| {
                    res.map_err(TaskError::from).and_then(|r| r).map_err(|e| {
                        log::error!("`{name}` background task failed: {e}");
                        e
                    })
                })
                .boxed_local()
        });
        future::try_join(set.map(Ok), future::try_join_all(tasks))
            .map(|r| r.map(drop))
            .boxed_local()
    }
}

#[cfg(test)]
mod spec {
    use std::{fmt, future::IntoFuture as _};

    use super::Background;

    #[derive(Debug)]
    struct Failed;

    impl fmt::Display for Failed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failed")
        }
    }

    impl std::error::Error for Failed {}

    #[tokio::test]
    async fn completes_with_its_tasks() {
        let mut bg = Background::default();
        bg.spawn("first", async { Ok::<_, Failed>(()) });
        bg.spawn("second", async { Ok::<_, Failed>(()) });
        assert_eq!(bg.len(), 2);

        assert!(bg.into_future().await.is_ok());
    }

    #[tokio::test]
    async fn fails_once_any_task_fails() {
        let mut bg = Background::default();
        bg.spawn("ok", async { Ok::<_, Failed>(()) });
        bg.spawn("failing", async { Err(Failed) });

        let err = bg.into_future().await.unwrap_err();
        assert_eq!(err.to_string(), "failed");
    }
}
