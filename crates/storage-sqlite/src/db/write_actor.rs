//! Single-writer actor serializing all database writes.
//!
//! SQLite allows one writer at a time; funneling every write through one
//! dedicated connection avoids lock contention and gives each job an
//! immediate transaction.

use super::DbPool;
use crate::errors::StorageError;
use bankwire_discount_core::errors::Result;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job: runs against the actor's connection, result type-erased so
// jobs with different return types share one channel.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Execute a database job on the writer's dedicated connection, inside
    /// an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawn the writer actor. It owns one pooled connection and processes
/// jobs serially until every `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Receiver may have gone away (request cancelled); nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
