//! Chat slice: sessions, the selected session and the assistant's
//! in-flight replies.

mod actions;
pub(crate) mod effects;
mod reducer;
pub mod selectors;
mod state;

pub use actions::ChatAction;
pub use reducer::ChatReducer;
pub use state::ChatState;
