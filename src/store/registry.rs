//! Bookkeeping for in-flight effect tasks.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::Mutex;
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use uuid::Uuid;

use crate::effect::CancelId;

/// Table of running effect tasks owned by one store.
///
/// Entries are added when an effect begins running and removed by the task
/// itself, through a non-owning back-reference, when it completes or is
/// aborted. Dropping the registry aborts everything still tracked, so no
/// effect task outlives its store.
pub(crate) struct TaskRegistry {
    tasks: Mutex<HashMap<Uuid, AbortHandle>>,
    cancellables: Mutex<HashMap<CancelId, HashMap<Uuid, AbortHandle>>>,
}

impl TaskRegistry {
    pub(crate) fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            cancellables: Mutex::new(HashMap::new()),
        }
    }

    /// Spawn `future` and record it under `id`.
    ///
    /// The table lock is held across the spawn so that a task finishing
    /// instantly cannot try to remove an entry that has not been inserted
    /// yet.
    pub(crate) fn spawn_tracked<F>(&self, id: Uuid, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        let handle = tokio::spawn(future);
        tasks.insert(id, handle.abort_handle());
        handle
    }

    /// Drop the entry for a finished or aborted task.
    pub(crate) fn untrack(&self, id: &Uuid) {
        self.tasks.lock().remove(id);
    }

    /// Spawn `future` into `set` and register its abort handle under the
    /// cancellation id.
    pub(crate) fn spawn_cancellable<F>(
        &self,
        id: CancelId,
        task_id: Uuid,
        set: &mut JoinSet<()>,
        future: F,
    ) where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut cancellables = self.cancellables.lock();
        let handle = set.spawn(future);
        cancellables.entry(id).or_default().insert(task_id, handle);
    }

    /// Drop one cancellation-id registration, pruning the id when it holds
    /// no more tasks.
    pub(crate) fn unregister_cancellable(&self, id: &CancelId, task_id: &Uuid) {
        let mut cancellables = self.cancellables.lock();
        if let Some(handles) = cancellables.get_mut(id) {
            handles.remove(task_id);
            if handles.is_empty() {
                cancellables.remove(id);
            }
        }
    }

    /// Abort every task registered under `id`. Unknown ids are a no-op.
    pub(crate) fn cancel(&self, id: &CancelId) {
        let handles = self.cancellables.lock().remove(id);
        match handles {
            Some(handles) => {
                tracing::debug!(%id, count = handles.len(), "cancelling in-flight effects by id");
                for handle in handles.into_values() {
                    handle.abort();
                }
            }
            None => tracing::trace!(%id, "cancel requested for an id with no running effects"),
        }
    }

    /// Abort every tracked task and clear both tables.
    pub(crate) fn cancel_all(&self) {
        let tracked: Vec<AbortHandle> = self.tasks.lock().drain().map(|(_, handle)| handle).collect();
        let cancellable: Vec<AbortHandle> = self
            .cancellables
            .lock()
            .drain()
            .flat_map(|(_, handles)| handles.into_values())
            .collect();

        let count = tracked.len() + cancellable.len();
        if count > 0 {
            tracing::debug!(count, "cancelling all in-flight effect tasks");
        }
        for handle in tracked.into_iter().chain(cancellable) {
            handle.abort();
        }
    }
}

impl Drop for TaskRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
