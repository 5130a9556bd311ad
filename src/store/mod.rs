//! The runtime owning state, applying reducers, and scheduling effects.

mod registry;
mod runtime;

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::effect::{ActionSender, Effect};
use crate::reducer::Reducer;

use registry::TaskRegistry;
use runtime::run_effect;

/// Runtime for one feature's state.
///
/// Owns the current state exclusively and advances it by applying the
/// reducer to incoming actions; effects returned by the reducer are scheduled
/// as tracked, cancellable tasks. The state lock is held only for the
/// synchronous `reduce` call, never across a suspension point, so there is
/// exactly one mutator context at a time no matter how many effects are in
/// flight.
///
/// `Store` is a cheap handle: clones share the same state and task table.
/// Dropping the last handle aborts every in-flight effect task. Must be used
/// from within a Tokio runtime.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner<R: Reducer> {
    state: Mutex<R::State>,
    reducer: R,
    registry: Arc<TaskRegistry>,
}

impl<R> Store<R>
where
    R: Reducer + Send + Sync + 'static,
    R::State: Send + 'static,
    R::Action: Send + 'static,
{
    /// A store holding `initial_state`, advanced by `reducer`.
    pub fn new(initial_state: R::State, reducer: R) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial_state),
                reducer,
                registry: Arc::new(TaskRegistry::new()),
            }),
        }
    }

    /// Apply the reducer to `action`, then run the returned effect to
    /// completion.
    ///
    /// Resolves once the effect's entire task, including everything it
    /// recursively causes through emitted actions, has finished. The effect
    /// runs under a fresh task id in the store's task table, so
    /// [`cancel_effects`](Self::cancel_effects) or store teardown can abort
    /// it mid-flight.
    pub async fn send(&self, action: R::Action) {
        let effect = self.inner.reduce(action);
        if effect.is_none() {
            return;
        }

        let task_id = Uuid::new_v4();
        tracing::trace!(task = %task_id, "scheduling effect");
        let sender = StoreInner::sender(&self.inner);
        let registry = Arc::downgrade(&self.inner.registry);
        let handle = self.inner.registry.spawn_tracked(
            task_id,
            untrack_on_exit(
                Arc::downgrade(&self.inner.registry),
                task_id,
                run_effect(effect.kind, sender, registry),
            ),
        );
        // JoinError here means the task was aborted; nothing to surface.
        let _ = handle.await;
    }

    /// Fire-and-forget variant of [`send`](Self::send): schedules the whole
    /// send as a tracked task without the caller waiting.
    pub fn send_detached(&self, action: R::Action) {
        let task_id = Uuid::new_v4();
        tracing::trace!(task = %task_id, "scheduling detached send");
        let weak = Arc::downgrade(&self.inner);
        self.inner.registry.spawn_tracked(
            task_id,
            untrack_on_exit(Arc::downgrade(&self.inner.registry), task_id, async move {
                if let Some(inner) = weak.upgrade() {
                    StoreInner::send_inline(inner, action).await;
                }
            }),
        );
    }

    /// Abort every currently tracked effect task and clear the task table.
    ///
    /// State is not reset; actions already applied stay applied. An empty
    /// table is a no-op.
    pub fn cancel_effects(&self) {
        self.inner.registry.cancel_all();
    }

    /// Read the current state through a closure, without cloning.
    ///
    /// The state lock is held for the duration of the closure; keep it short
    /// and never call back into the store from inside it.
    pub fn with_state<T>(&self, read: impl FnOnce(&R::State) -> T) -> T {
        let state = self.inner.state.lock();
        read(&state)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State
    where
        R::State: Clone,
    {
        self.with_state(R::State::clone)
    }
}

impl<R> StoreInner<R>
where
    R: Reducer + Send + Sync + 'static,
    R::State: Send + 'static,
    R::Action: Send + 'static,
{
    /// One single-writer transition: the state lock is taken, the reducer
    /// runs synchronously, the lock is released.
    fn reduce(&self, action: R::Action) -> Effect<R::Action> {
        let mut state = self.state.lock();
        self.reducer.reduce(&mut state, action)
    }

    /// Send capability handed to effect operations. Holds the store weakly:
    /// actions emitted after teardown are dropped, not delivered.
    fn sender(inner: &Arc<Self>) -> ActionSender<R::Action> {
        let weak = Arc::downgrade(inner);
        ActionSender::from_fn(
            move |action| -> Pin<Box<dyn Future<Output = ()> + Send>> {
                let weak = Weak::clone(&weak);
                Box::pin(async move {
                    match weak.upgrade() {
                        Some(inner) => StoreInner::send_inline(inner, action).await,
                        None => tracing::trace!("emitted action dropped; store is gone"),
                    }
                })
            },
        )
    }

    /// Recursive send path for actions emitted by running effects.
    ///
    /// Runs inline inside the emitting task rather than spawning a sibling:
    /// aborting the entry-point task is then structurally guaranteed to stop
    /// the entire tree it caused.
    async fn send_inline(inner: Arc<Self>, action: R::Action) {
        let effect = inner.reduce(action);
        if effect.is_none() {
            return;
        }
        let sender = Self::sender(&inner);
        let registry = Arc::downgrade(&inner.registry);
        // Hold the store only weakly while the effect runs.
        drop(inner);
        run_effect(effect.kind, sender, registry).await;
    }
}

/// Wrap an effect task so it removes its own table entry when it completes
/// or is aborted, via a non-owning back-reference to the registry.
async fn untrack_on_exit(
    registry: Weak<TaskRegistry>,
    task_id: Uuid,
    future: impl Future<Output = ()>,
) {
    let _cleanup = scopeguard::guard((), move |_| {
        if let Some(registry) = registry.upgrade() {
            registry.untrack(&task_id);
        }
    });
    future.await;
}
