//! Workflow state and controller.

mod session;
mod workflow;

pub use session::{InputMethod, Session, WorkflowStep};
pub use workflow::{WorkflowController, WorkflowError, WorkflowResult};
