//! The capability an effect operation uses to emit actions.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type Deliver<A> = dyn Fn(A) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync;

/// Handle through which a running effect feeds actions back into the store.
///
/// Each `send` re-enters the store's single-writer discipline: it resolves
/// once the action's reducer call and the entire effect tree it causes have
/// finished. If the owning store has been torn down the action is dropped
/// silently.
pub struct ActionSender<A> {
    deliver: Arc<Deliver<A>>,
}

impl<A> Clone for ActionSender<A> {
    fn clone(&self) -> Self {
        Self {
            deliver: Arc::clone(&self.deliver),
        }
    }
}

impl<A: Send + 'static> ActionSender<A> {
    pub(crate) fn from_fn<F>(deliver: F) -> Self
    where
        F: Fn(A) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
    {
        Self {
            deliver: Arc::new(deliver),
        }
    }

    /// Emit one action and wait for everything it causes to finish.
    pub async fn send(&self, action: A) {
        (self.deliver)(action).await;
    }

    /// Sender that routes values through `embed` before delivery. Used to
    /// lift a child effect's emissions into a parent action space.
    pub(crate) fn premap<U, F>(&self, embed: F) -> ActionSender<U>
    where
        U: Send + 'static,
        F: Fn(U) -> A + Send + Sync + 'static,
    {
        let parent = Arc::clone(&self.deliver);
        ActionSender::from_fn(move |value| (parent)(embed(value)))
    }
}
