//! Document detail slice: the single document being viewed or edited.
//!
//! Reads (`loading`) and writes (`saving`) are tracked separately; the edit
//! mode and autosave toggles only change on their own actions.

mod actions;
pub(crate) mod effects;
mod reducer;
pub mod selectors;
mod state;

pub use actions::DocumentDetailAction;
pub use reducer::DocumentDetailReducer;
pub use state::DocumentDetailState;
