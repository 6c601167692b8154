mod errors;
mod import_workflow;

pub use errors::WorkflowError;
pub use import_workflow::ImportWorkflow;
