//! Case-level routing for tagged-union action types.

use std::sync::Arc;

/// A pair of pure functions projecting a parent action space onto a child's
/// action space and lifting child actions back up.
///
/// `extract` returns `None` for any root value whose tag does not match.
/// That is not an error: it signals "this action is not for me" and callers
/// treat it as a no-op. For every value `v`,
/// `extract(embed(v)) == Some(v)` must hold.
pub struct ActionPath<Root, Value> {
    extract: Arc<dyn Fn(Root) -> Option<Value> + Send + Sync>,
    embed: Arc<dyn Fn(Value) -> Root + Send + Sync>,
}

impl<Root, Value> Clone for ActionPath<Root, Value> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            embed: Arc::clone(&self.embed),
        }
    }
}

impl<Root, Value> ActionPath<Root, Value> {
    /// Build a path from the two halves directly.
    pub fn new(
        extract: impl Fn(Root) -> Option<Value> + Send + Sync + 'static,
        embed: impl Fn(Value) -> Root + Send + Sync + 'static,
    ) -> Self {
        Self {
            extract: Arc::new(extract),
            embed: Arc::new(embed),
        }
    }

    /// Narrow a root action to this path's value space.
    pub fn extract(&self, root: Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Lift a value back into the root action space.
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }
}

impl<Root> ActionPath<Root, ()>
where
    Root: Clone + PartialEq + Send + Sync + 'static,
{
    /// Path for a variant that carries no payload.
    ///
    /// Extraction succeeds exactly when the root action equals the canonical
    /// variant value; embedding reproduces that value.
    pub fn unit(root: Root) -> Self {
        let canonical = root.clone();
        Self::new(
            move |candidate| (candidate == canonical).then_some(()),
            move |()| root.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Parent {
        Child(u32),
        Refresh,
        Other,
    }

    fn child_path() -> ActionPath<Parent, u32> {
        ActionPath::new(
            |parent| match parent {
                Parent::Child(value) => Some(value),
                _ => None,
            },
            Parent::Child,
        )
    }

    #[test]
    fn round_trip_recovers_value() {
        let path = child_path();
        assert_eq!(path.extract(path.embed(7)), Some(7));
    }

    #[test]
    fn extract_misses_on_other_tags() {
        let path = child_path();
        assert_eq!(path.extract(Parent::Refresh), None);
        assert_eq!(path.extract(Parent::Other), None);
    }

    #[test]
    fn unit_path_matches_only_its_variant() {
        let path = ActionPath::unit(Parent::Refresh);
        assert_eq!(path.extract(Parent::Refresh), Some(()));
        assert_eq!(path.extract(Parent::Child(1)), None);
        assert_eq!(path.embed(()), Parent::Refresh);
    }

    #[test]
    fn unit_path_round_trips() {
        let path = ActionPath::unit(Parent::Refresh);
        assert_eq!(path.extract(path.embed(())), Some(()));
    }
}
