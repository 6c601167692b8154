mod actions;
mod session;

pub use actions::{Action, Confirmation, ExclusionOutcome, Transition};
pub use session::ImportSession;
