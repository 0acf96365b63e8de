//! Unidirectional data-flow primitives.
//!
//! # Architecture
//!
//! ```text
//! dispatch(Action) ──→ Reducer ──→ State ──→ Selector ──→ caller
//!        ↑                │
//!        │                ↓
//!        └──────────── Effect (async I/O, follow-up Action)
//! ```
//!
//! - **State**: immutable snapshot of one slice
//! - **Action**: intent or completion event
//! - **Reducer**: pure function that transforms state based on actions

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::SliceState;
