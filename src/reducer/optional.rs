//! Lifting a reducer over optional state.

use crate::effect::Effect;

use super::Reducer;

/// Adapter returned by [`Reducer::optional`].
///
/// Runs the wrapped reducer when the state is present; when it is absent the
/// action is ignored and no effect is produced.
pub struct Optional<R> {
    inner: R,
}

impl<R> Optional<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> Reducer for Optional<R>
where
    R: Reducer,
    R::Action: Send + 'static,
{
    type State = Option<R::State>;
    type Action = R::Action;

    fn reduce(&self, state: &mut Option<R::State>, action: Self::Action) -> Effect<Self::Action> {
        match state.as_mut() {
            Some(state) => self.inner.reduce(state, action),
            None => {
                tracing::debug!("action arrived while state is absent; ignoring");
                Effect::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Incrementer;

    impl Reducer for Incrementer {
        type State = i64;
        type Action = ();

        fn reduce(&self, state: &mut i64, (): ()) -> Effect<()> {
            *state += 1;
            Effect::none()
        }
    }

    #[test]
    fn present_state_reduces() {
        let reducer = Incrementer.optional();
        let mut state = Some(1);

        reducer.reduce(&mut state, ());

        assert_eq!(state, Some(2));
    }

    #[test]
    fn absent_state_is_untouched() {
        let reducer = Incrementer.optional();
        let mut state: Option<i64> = None;

        let effect = reducer.reduce(&mut state, ());

        assert_eq!(state, None);
        assert!(effect.is_none());
    }
}
