//! Documents list slice: the loaded collection, its pending flag, last
//! error and the active text filter.
//!
//! - `state.rs` - Slice state
//! - `actions.rs` - Intents and their `*Success`/`*Failure` follow-ups
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `effects.rs` - Service calls for the async intents
//! - `selectors.rs` - Derived read-only views

mod actions;
pub(crate) mod effects;
mod reducer;
pub mod selectors;
mod state;

pub use actions::DocumentsListAction;
pub use reducer::DocumentsListReducer;
pub use state::DocumentsListState;
