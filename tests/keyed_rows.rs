//! Routing element actions across a keyed collection, with a parent layer
//! deriving an aggregate from the elements.

mod common;

use common::init_tracing;
use uniflow::{ActionPath, Effect, ForEach, Keyed, KeyedList, Reducer, Store};

#[derive(Debug, Clone, PartialEq)]
struct RowState {
    id: u32,
    count: i64,
}

impl Keyed for RowState {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RowAction {
    Increment,
}

struct RowReducer;

impl Reducer for RowReducer {
    type State = RowState;
    type Action = RowAction;

    fn reduce(&self, state: &mut RowState, action: RowAction) -> Effect<RowAction> {
        match action {
            RowAction::Increment => state.count += 1,
        }
        Effect::none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Dashboard {
    rows: KeyedList<RowState>,
    total: i64,
}

#[derive(Debug, Clone, PartialEq)]
enum DashboardAction {
    Row(u32, RowAction),
    Remove(u32),
}

struct RemoveReducer;

impl Reducer for RemoveReducer {
    type State = Dashboard;
    type Action = DashboardAction;

    fn reduce(&self, state: &mut Dashboard, action: DashboardAction) -> Effect<DashboardAction> {
        if let DashboardAction::Remove(id) = action {
            state.rows.remove(&id);
        }
        Effect::none()
    }
}

/// Recomputes the aggregate after whatever ran before it in the tuple.
struct TotalReducer;

impl Reducer for TotalReducer {
    type State = Dashboard;
    type Action = DashboardAction;

    fn reduce(&self, state: &mut Dashboard, _action: DashboardAction) -> Effect<DashboardAction> {
        state.total = state.rows.iter().map(|row| row.count).sum();
        Effect::none()
    }
}

fn row_path() -> ActionPath<DashboardAction, (u32, RowAction)> {
    ActionPath::new(
        |action| match action {
            DashboardAction::Row(id, inner) => Some((id, inner)),
            _ => None,
        },
        |(id, inner)| DashboardAction::Row(id, inner),
    )
}

fn dashboard_reducer() -> impl Reducer<State = Dashboard, Action = DashboardAction> {
    (
        ForEach::new(|state: &mut Dashboard| &mut state.rows, row_path(), RowReducer),
        RemoveReducer,
        TotalReducer,
    )
}

fn three_rows() -> Dashboard {
    Dashboard {
        rows: (1..=3).map(|id| RowState { id, count: 0 }).collect(),
        total: 0,
    }
}

fn counts(store: &Store<impl Reducer<State = Dashboard, Action = DashboardAction> + Send + Sync + 'static>) -> Vec<i64> {
    store.with_state(|state| state.rows.iter().map(|row| row.count).collect())
}

#[tokio::test]
async fn element_actions_update_their_row_and_the_aggregate() {
    init_tracing();
    let store = Store::new(three_rows(), dashboard_reducer());

    store.send(DashboardAction::Row(1, RowAction::Increment)).await;
    store.send(DashboardAction::Row(1, RowAction::Increment)).await;
    store.send(DashboardAction::Row(2, RowAction::Increment)).await;

    assert_eq!(counts(&store), vec![2, 1, 0]);
    assert_eq!(store.with_state(|state| state.total), 3);
}

#[tokio::test]
async fn removal_preserves_order_and_recomputes_the_aggregate() {
    init_tracing();
    let store = Store::new(three_rows(), dashboard_reducer());

    store.send(DashboardAction::Row(1, RowAction::Increment)).await;
    store.send(DashboardAction::Row(1, RowAction::Increment)).await;
    store.send(DashboardAction::Row(2, RowAction::Increment)).await;
    store.send(DashboardAction::Remove(2)).await;

    assert_eq!(counts(&store), vec![2, 0]);
    assert_eq!(store.with_state(|state| state.total), 2);
    let ids: Vec<u32> = store.with_state(|state| state.rows.keys().collect());
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn action_for_a_removed_row_is_dropped_silently() {
    init_tracing();
    let store = Store::new(three_rows(), dashboard_reducer());

    store.send(DashboardAction::Remove(2)).await;
    let before = store.state();

    store.send(DashboardAction::Row(2, RowAction::Increment)).await;

    assert_eq!(store.state(), before);
}
