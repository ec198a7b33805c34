use std::future::Future;
use std::panic;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration for a [`RunGroup`].
#[derive(Clone, Debug)]
pub struct GroupConfig<F> {
    /// Worker count and queue capacity. `0` is treated as `1`.
    pub num_workers: usize,
    pub handle: F,
}

impl<F> GroupConfig<F> {
    pub fn new(handle: F) -> Self {
        Self {
            num_workers: 1,
            handle,
        }
    }

    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }
}

/// A fixed set of workers draining a bounded queue.
///
/// The first handler error cancels the group: idle workers stop, items still
/// queued are dropped, and [`RunGroup::enqueue`] discards new items.
pub struct RunGroup<T, E> {
    sender: mpsc::Sender<T>,
    cancelled: watch::Receiver<bool>,
    workers: JoinSet<std::result::Result<(), E>>,
}

impl<T, E> RunGroup<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Spawn the workers on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new<F, Fut>(config: GroupConfig<F>) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    {
        let num_workers = config.num_workers.max(1);
        let (sender, receiver) = mpsc::channel(num_workers);
        let (cancel, cancelled) = watch::channel(false);

        let queue = Arc::new(Mutex::new(receiver));
        let handle = Arc::new(config.handle);
        let cancel = Arc::new(cancel);

        let mut workers = JoinSet::new();
        for _ in 0..num_workers {
            workers.spawn(work(
                Arc::clone(&queue),
                Arc::clone(&handle),
                Arc::clone(&cancel),
                cancelled.clone(),
            ));
        }
        debug!(num_workers, "started run group");

        Self {
            sender,
            cancelled,
            workers,
        }
    }

    /// Queue `item` for a worker, waiting only while the queue is full.
    ///
    /// Once the group is cancelled the item is dropped and `Ok` is returned.
    /// Fails with [`Error::WorkersStopped`] if every worker exited without a
    /// cancellation, which only happens when they all panicked.
    pub async fn enqueue(&self, item: T) -> Result<()> {
        let mut cancelled = self.cancelled.clone();
        tokio::select! {
            biased;
            _ = cancelled.wait_for(|cancelled| *cancelled) => {
                debug!("run group cancelled, dropping item");
                Ok(())
            }
            sent = self.sender.send(item) => match sent {
                Ok(()) => Ok(()),
                Err(_) if *self.cancelled.borrow() => Ok(()),
                Err(_) => Err(Error::WorkersStopped),
            },
        }
    }

    /// Close the queue, wait for every worker and return the first handler error.
    ///
    /// A worker panic is resumed on the calling task.
    pub async fn wait(self) -> std::result::Result<(), E> {
        let Self {
            sender,
            mut workers,
            ..
        } = self;
        drop(sender);

        let mut first_err = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_err.get_or_insert(err);
                }
                Err(join_err) if join_err.is_panic() => {
                    panic::resume_unwind(join_err.into_panic());
                }
                Err(join_err) => debug!(error = %join_err, "worker aborted"),
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

async fn work<T, E, F, Fut>(
    queue: Arc<Mutex<mpsc::Receiver<T>>>,
    handle: Arc<F>,
    cancel: Arc<watch::Sender<bool>>,
    mut cancelled: watch::Receiver<bool>,
) -> std::result::Result<(), E>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = std::result::Result<(), E>>,
{
    loop {
        let item = tokio::select! {
            biased;
            _ = cancelled.wait_for(|cancelled| *cancelled) => return Ok(()),
            item = next(&queue) => item,
        };
        let Some(item) = item else {
            return Ok(());
        };

        if let Err(err) = handle(item).await {
            // only the worker that flips the flag reports its error
            let first = cancel.send_if_modified(|cancelled| !std::mem::replace(cancelled, true));
            return if first { Err(err) } else { Ok(()) };
        }
    }
}

async fn next<T>(queue: &Mutex<mpsc::Receiver<T>>) -> Option<T> {
    queue.lock().await.recv().await
}
