//! Embedding a single child reducer into a parent state/action pair.

use std::marker::PhantomData;

use crate::effect::Effect;
use crate::routing::ActionPath;

use super::Reducer;

/// Reducer combinator wiring a child reducer to a slice of parent state and a
/// case of the parent action space.
///
/// A parent action the route does not recognize leaves the child state
/// untouched and produces no effect. When the route matches, the child
/// reducer runs on the slice and every action its effect emits is lifted back
/// into the parent action space through the route's embed half.
pub struct Scope<S, A, R, F>
where
    R: Reducer,
{
    lens: F,
    route: ActionPath<A, R::Action>,
    child: R,
    _parent: PhantomData<fn(S) -> S>,
}

impl<S, A, R, F> Scope<S, A, R, F>
where
    R: Reducer,
{
    /// Wire `child` behind a mutable-field accessor and an action route.
    pub fn new(lens: F, route: ActionPath<A, R::Action>, child: R) -> Self
    where
        F: for<'a> Fn(&'a mut S) -> &'a mut R::State,
    {
        Self {
            lens,
            route,
            child,
            _parent: PhantomData,
        }
    }
}

impl<S, A, R, F> Reducer for Scope<S, A, R, F>
where
    A: Send + 'static,
    R: Reducer,
    R::Action: Send + 'static,
    F: for<'a> Fn(&'a mut S) -> &'a mut R::State,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut S, action: A) -> Effect<A> {
        let Some(child_action) = self.route.extract(action) else {
            return Effect::none();
        };
        let effect = self.child.reduce((self.lens)(state), child_action);
        let route = self.route.clone();
        effect.map(move |action| route.embed(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Parent {
        count: i64,
        title: &'static str,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ParentAction {
        Counter(CounterAction),
        Rename,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Increment,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = i64;
        type Action = CounterAction;

        fn reduce(&self, state: &mut i64, action: CounterAction) -> Effect<CounterAction> {
            match action {
                CounterAction::Increment => *state += 1,
            }
            Effect::none()
        }
    }

    fn scoped() -> impl Reducer<State = Parent, Action = ParentAction> {
        Scope::new(
            |parent: &mut Parent| &mut parent.count,
            ActionPath::new(
                |action| match action {
                    ParentAction::Counter(inner) => Some(inner),
                    _ => None,
                },
                ParentAction::Counter,
            ),
            CounterReducer,
        )
    }

    #[test]
    fn matching_action_reduces_the_slice() {
        let reducer = scoped();
        let mut state = Parent { count: 0, title: "A" };

        reducer.reduce(&mut state, ParentAction::Counter(CounterAction::Increment));

        assert_eq!(state, Parent { count: 1, title: "A" });
    }

    #[test]
    fn unrecognized_action_leaves_child_state_unchanged() {
        let reducer = scoped();
        let mut state = Parent { count: 3, title: "A" };
        let before = state.clone();

        let effect = reducer.reduce(&mut state, ParentAction::Rename);

        assert_eq!(state, before);
        assert!(effect.is_none());
    }
}
