//! Effects: values describing asynchronous work and the actions it emits.
//!
//! An [`Effect`] is a description, not a running task; it becomes one only
//! when a store schedules it. Evaluating the same effect twice produces
//! operations of the same shape; what the async work actually does each run
//! is exactly what the effect boundary exists to keep out of reducers.

mod cancel;
mod priority;
mod sender;

use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::{pin, Pin};
use std::sync::Arc;

use futures_core::Stream;

pub use cancel::CancelId;
pub use priority::Priority;
pub use sender::ActionSender;

type Operation<A> =
    Box<dyn FnOnce(ActionSender<A>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

pub(crate) enum EffectKind<A> {
    None,
    Run {
        priority: Option<Priority>,
        operation: Operation<A>,
    },
    Merge(Vec<EffectKind<A>>),
    Concat(Vec<EffectKind<A>>),
    Cancellable {
        id: CancelId,
        kind: Box<EffectKind<A>>,
    },
    Cancel(CancelId),
}

/// Description of zero or more asynchronous units of work that may emit
/// further actions.
pub struct Effect<A> {
    pub(crate) kind: EffectKind<A>,
}

impl<A: Send + 'static> Effect<A> {
    /// The effect that completes immediately and emits nothing.
    ///
    /// Running it is a synchronous no-op.
    pub fn none() -> Self {
        Self {
            kind: EffectKind::None,
        }
    }

    /// An effect wrapping one async operation.
    ///
    /// The operation receives an [`ActionSender`] and may emit any number of
    /// actions over its lifetime before completing. Its own emissions are
    /// delivered in the order it sends them.
    pub fn run<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(ActionSender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            kind: EffectKind::Run {
                priority: None,
                operation: Box::new(
                    move |sender| -> Pin<Box<dyn Future<Output = ()> + Send>> {
                        Box::pin(operation(sender))
                    },
                ),
            },
        }
    }

    /// An effect that immediately emits exactly one action and completes.
    pub fn send(action: A) -> Self {
        Self::run(move |sender| async move {
            sender.send(action).await;
        })
    }

    /// An effect that forwards every item of `stream`, in order, then
    /// completes when the stream ends.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = A> + Send + 'static,
    {
        Self::run(move |sender| async move {
            let mut stream = pin!(stream);
            while let Some(action) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
                sender.send(action).await;
            }
        })
    }

    /// Like [`stream`](Self::stream) over a fallible stream: the first `Err`
    /// stops emission. The failure is not converted into an action and never
    /// reaches the store; reducers needing failure visibility must have the
    /// operation emit a failure action instead.
    pub fn try_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<A, E>> + Send + 'static,
        E: fmt::Display + Send,
    {
        Self::run(move |sender| async move {
            let mut stream = pin!(stream);
            while let Some(item) = poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
                match item {
                    Ok(action) => sender.send(action).await,
                    Err(error) => {
                        tracing::warn!(%error, "effect stream failed; emission stopped");
                        break;
                    }
                }
            }
        })
    }

    /// Run all given effects concurrently as sibling tasks; completes when
    /// all complete.
    ///
    /// Each effect's own emissions keep their order, but emissions from
    /// different effects may interleave arbitrarily.
    pub fn merge(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        Self::combine(effects, EffectKind::Merge)
    }

    /// Run each given effect to completion, strictly in sequence, before
    /// starting the next. An empty list is equivalent to [`none`](Self::none).
    pub fn concatenate(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        Self::combine(effects, EffectKind::Concat)
    }

    fn combine(
        effects: impl IntoIterator<Item = Effect<A>>,
        build: fn(Vec<EffectKind<A>>) -> EffectKind<A>,
    ) -> Self {
        let mut kinds: Vec<EffectKind<A>> = effects
            .into_iter()
            .filter(|effect| !effect.is_none())
            .map(|effect| effect.kind)
            .collect();
        let kind = match kinds.len() {
            0 => EffectKind::None,
            1 => kinds.remove(0),
            _ => build(kinds),
        };
        Self { kind }
    }

    /// Wrap every emitted action through `transform` before delivery.
    ///
    /// [`none`](Self::none) maps to `none`.
    pub fn map<B, F>(self, transform: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Effect {
            kind: map_kind(self.kind, Arc::new(transform)),
        }
    }

    /// Register the running effect under `id` so a later
    /// [`cancel`](Self::cancel) (or the store's own teardown) can abort it.
    pub fn cancellable(self, id: impl Into<CancelId>) -> Self {
        if self.is_none() {
            return self;
        }
        Self {
            kind: EffectKind::Cancellable {
                id: id.into(),
                kind: Box::new(self.kind),
            },
        }
    }

    /// An effect that aborts every in-flight effect currently registered
    /// under `id` on the store running it. Unknown ids are a no-op.
    pub fn cancel(id: impl Into<CancelId>) -> Self {
        Self {
            kind: EffectKind::Cancel(id.into()),
        }
    }

    /// Apply a scheduling hint to every `run` operation in this effect that
    /// does not already carry one.
    pub fn priority(mut self, priority: Priority) -> Self {
        set_priority(&mut self.kind, priority);
        self
    }

    /// Whether this effect is the neutral [`none`](Self::none) value.
    pub fn is_none(&self) -> bool {
        matches!(self.kind, EffectKind::None)
    }
}

fn map_kind<A, B>(kind: EffectKind<A>, transform: Arc<dyn Fn(A) -> B + Send + Sync>) -> EffectKind<B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    match kind {
        EffectKind::None => EffectKind::None,
        EffectKind::Run {
            priority,
            operation,
        } => EffectKind::Run {
            priority,
            operation: Box::new(move |sender: ActionSender<B>| {
                operation(sender.premap(move |action| (transform)(action)))
            }),
        },
        EffectKind::Merge(children) => EffectKind::Merge(
            children
                .into_iter()
                .map(|child| map_kind(child, Arc::clone(&transform)))
                .collect(),
        ),
        EffectKind::Concat(children) => EffectKind::Concat(
            children
                .into_iter()
                .map(|child| map_kind(child, Arc::clone(&transform)))
                .collect(),
        ),
        EffectKind::Cancellable { id, kind } => EffectKind::Cancellable {
            id,
            kind: Box::new(map_kind(*kind, transform)),
        },
        EffectKind::Cancel(id) => EffectKind::Cancel(id),
    }
}

fn set_priority<A>(kind: &mut EffectKind<A>, priority: Priority) {
    match kind {
        EffectKind::Run { priority: slot, .. } => {
            if slot.is_none() {
                *slot = Some(priority);
            }
        }
        EffectKind::Merge(children) | EffectKind::Concat(children) => {
            for child in children {
                set_priority(child, priority);
            }
        }
        EffectKind::Cancellable { kind, .. } => set_priority(kind, priority),
        EffectKind::None | EffectKind::Cancel(_) => {}
    }
}

impl<A> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EffectKind::None => f.write_str("Effect::none"),
            EffectKind::Run { priority, .. } => f
                .debug_struct("Effect::run")
                .field("priority", priority)
                .finish_non_exhaustive(),
            EffectKind::Merge(children) => {
                write!(f, "Effect::merge({} effects)", children.len())
            }
            EffectKind::Concat(children) => {
                write!(f, "Effect::concatenate({} effects)", children.len())
            }
            EffectKind::Cancellable { id, .. } => f
                .debug_struct("Effect::cancellable")
                .field("id", id)
                .finish_non_exhaustive(),
            EffectKind::Cancel(id) => f.debug_tuple("Effect::cancel").field(id).finish(),
        }
    }
}
