//! Sequential combination of reducers sharing one state/action pair.
//!
//! Tuples of 2 through 5 reducers run in declaration order against the same
//! state reference, so later members see earlier members' mutations, and
//! their effects are merged. Members receive the action by value, hence the
//! `Action: Clone` bound on every member but the last.

use crate::effect::Effect;

use super::Reducer;

impl<R1, R2> Reducer for (R1, R2)
where
    R1: Reducer,
    R1::Action: Clone + Send + 'static,
    R2: Reducer<State = R1::State, Action = R1::Action>,
{
    type State = R1::State;
    type Action = R1::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        let first = self.0.reduce(state, action.clone());
        let second = self.1.reduce(state, action);
        Effect::merge([first, second])
    }
}

impl<R1, R2, R3> Reducer for (R1, R2, R3)
where
    R1: Reducer,
    R1::Action: Clone + Send + 'static,
    R2: Reducer<State = R1::State, Action = R1::Action>,
    R3: Reducer<State = R1::State, Action = R1::Action>,
{
    type State = R1::State;
    type Action = R1::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        let first = self.0.reduce(state, action.clone());
        let second = self.1.reduce(state, action.clone());
        let third = self.2.reduce(state, action);
        Effect::merge([first, second, third])
    }
}

impl<R1, R2, R3, R4> Reducer for (R1, R2, R3, R4)
where
    R1: Reducer,
    R1::Action: Clone + Send + 'static,
    R2: Reducer<State = R1::State, Action = R1::Action>,
    R3: Reducer<State = R1::State, Action = R1::Action>,
    R4: Reducer<State = R1::State, Action = R1::Action>,
{
    type State = R1::State;
    type Action = R1::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        let first = self.0.reduce(state, action.clone());
        let second = self.1.reduce(state, action.clone());
        let third = self.2.reduce(state, action.clone());
        let fourth = self.3.reduce(state, action);
        Effect::merge([first, second, third, fourth])
    }
}

impl<R1, R2, R3, R4, R5> Reducer for (R1, R2, R3, R4, R5)
where
    R1: Reducer,
    R1::Action: Clone + Send + 'static,
    R2: Reducer<State = R1::State, Action = R1::Action>,
    R3: Reducer<State = R1::State, Action = R1::Action>,
    R4: Reducer<State = R1::State, Action = R1::Action>,
    R5: Reducer<State = R1::State, Action = R1::Action>,
{
    type State = R1::State;
    type Action = R1::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        let first = self.0.reduce(state, action.clone());
        let second = self.1.reduce(state, action.clone());
        let third = self.2.reduce(state, action.clone());
        let fourth = self.3.reduce(state, action.clone());
        let fifth = self.4.reduce(state, action);
        Effect::merge([first, second, third, fourth, fifth])
    }
}

/// A choice between two reducer shapes over the same state/action pair.
pub enum Either<L, R> {
    /// The first shape.
    Left(L),
    /// The second shape.
    Right(R),
}

impl<L, R> Reducer for Either<L, R>
where
    L: Reducer,
    R: Reducer<State = L::State, Action = L::Action>,
{
    type State = L::State;
    type Action = L::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        match self {
            Either::Left(reducer) => reducer.reduce(state, action),
            Either::Right(reducer) => reducer.reduce(state, action),
        }
    }
}

// An absent branch: `None` is the identity reducer.
impl<R> Reducer for Option<R>
where
    R: Reducer,
    R::Action: Send + 'static,
{
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        match self {
            Some(reducer) => reducer.reduce(state, action),
            None => Effect::none(),
        }
    }
}
