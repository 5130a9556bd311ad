//! Interpretation of effect values as concurrent tasks.

use std::future::Future;
use std::pin::Pin;
use std::sync::Weak;

use tokio::task::JoinSet;
use uuid::Uuid;

use crate::effect::{ActionSender, EffectKind};

use super::registry::TaskRegistry;

/// Drive one effect to completion.
///
/// Sibling work (merged children and priority-tagged operations) runs in a
/// [`JoinSet`], so dropping this future aborts the whole subtree: cancelling
/// an effect task structurally cancels everything it started. The registry is
/// held weakly; once the owning store is gone, cancellation bookkeeping
/// degrades to a no-op while the remaining teardown proceeds.
///
/// A panic inside an operation ends that operation's emission and nothing
/// else, the same policy as any other effect-internal failure.
pub(crate) fn run_effect<A: Send + 'static>(
    kind: EffectKind<A>,
    sender: ActionSender<A>,
    registry: Weak<TaskRegistry>,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        match kind {
            EffectKind::None => {}
            EffectKind::Run {
                priority,
                operation,
            } => match priority {
                None => operation(sender).await,
                Some(priority) => {
                    tracing::trace!(?priority, "running operation as its own task");
                    let mut set = JoinSet::new();
                    set.spawn(operation(sender));
                    drain(&mut set).await;
                }
            },
            EffectKind::Merge(children) => {
                let mut set = JoinSet::new();
                for child in children {
                    set.spawn(run_effect(child, sender.clone(), Weak::clone(&registry)));
                }
                drain(&mut set).await;
            }
            EffectKind::Concat(children) => {
                for child in children {
                    run_effect(child, sender.clone(), Weak::clone(&registry)).await;
                }
            }
            EffectKind::Cancellable { id, kind } => {
                let Some(owner) = registry.upgrade() else {
                    return;
                };
                let task_id = Uuid::new_v4();
                let mut set = JoinSet::new();
                owner.spawn_cancellable(
                    id.clone(),
                    task_id,
                    &mut set,
                    run_effect(*kind, sender, Weak::clone(&registry)),
                );
                drop(owner);

                let _cleanup = scopeguard::guard((), move |_| {
                    if let Some(owner) = registry.upgrade() {
                        owner.unregister_cancellable(&id, &task_id);
                    }
                });
                drain(&mut set).await;
            }
            EffectKind::Cancel(id) => {
                if let Some(owner) = registry.upgrade() {
                    owner.cancel(&id);
                }
            }
        }
    })
}

/// Wait for every task in the set; aborted or panicked members are absorbed.
async fn drain(set: &mut JoinSet<()>) {
    while set.join_next().await.is_some() {}
}
