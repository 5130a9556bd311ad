//! Routing element actions across a keyed collection of child states.

use std::marker::PhantomData;

use crate::effect::Effect;
use crate::keyed::{Keyed, KeyedList};
use crate::routing::ActionPath;

use super::Reducer;

type KeyOf<R> = <<R as Reducer>::State as Keyed>::Key;

/// Reducer combinator embedding a child reducer across every element of a
/// [`KeyedList`], routed by key.
///
/// The route extracts a `(key, action)` pair from the parent action. A key
/// with no surviving element (removed earlier in the same transition, for
/// instance) is an expected outcome: the action is dropped, no other element
/// is touched, and no effect is produced.
pub struct ForEach<S, A, R, F>
where
    R: Reducer,
    R::State: Keyed,
{
    lens: F,
    route: ActionPath<A, (KeyOf<R>, R::Action)>,
    element: R,
    _parent: PhantomData<fn(S) -> S>,
}

impl<S, A, R, F> ForEach<S, A, R, F>
where
    R: Reducer,
    R::State: Keyed,
{
    /// Wire `element` behind an accessor to the parent's keyed collection and
    /// a route extracting `(key, action)` pairs.
    pub fn new(lens: F, route: ActionPath<A, (KeyOf<R>, R::Action)>, element: R) -> Self
    where
        F: for<'a> Fn(&'a mut S) -> &'a mut KeyedList<R::State>,
    {
        Self {
            lens,
            route,
            element,
            _parent: PhantomData,
        }
    }
}

impl<S, A, R, F> Reducer for ForEach<S, A, R, F>
where
    A: Send + 'static,
    R: Reducer,
    R::State: Keyed,
    KeyOf<R>: Send + Sync + 'static,
    R::Action: Send + 'static,
    F: for<'a> Fn(&'a mut S) -> &'a mut KeyedList<R::State>,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut S, action: A) -> Effect<A> {
        let Some((key, child_action)) = self.route.extract(action) else {
            return Effect::none();
        };
        let list = (self.lens)(state);
        let Some(element_state) = list.get_mut(&key) else {
            tracing::debug!("element no longer present; dropping its action");
            return Effect::none();
        };
        let effect = self.element.reduce(element_state, child_action);
        let route = self.route.clone();
        effect.map(move |action| route.embed((key.clone(), action)))
    }
}
