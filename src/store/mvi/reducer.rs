use super::action::Action;
use super::state::SliceState;

/// Transition function for one slice.
///
/// `reduce` consumes the previous snapshot and returns the next one. It does
/// no I/O; anything asynchronous belongs in the slice's effects.
pub trait Reducer {
    type State: SliceState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
