pub mod interaction;
pub mod session;
pub mod step;
pub mod types;

pub use interaction::{ElementInfo, Interaction, PointerPosition};
pub use session::{new_session_id, Session};
pub use step::WorkflowStep;
pub use types::*;
