//! Command implementations, independent of argument parsing

pub mod config_cmd;
pub mod orchestration;

pub use config_cmd::{run_config_list, run_config_set, ConfigSetArgs, ConfigSetOutcome};
pub use orchestration::{
    plan_steps, run_publish_workflow, Collaborators, PublishEvent, PublishStep,
    PublishWorkflowArgs, WorkflowResult,
};
