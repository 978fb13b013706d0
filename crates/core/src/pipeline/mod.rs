pub mod caption_error;
pub mod generate_captions_use_case;
pub mod pipeline_logger;
pub mod poll_policy;
pub mod workflow_parameters;
pub mod workflow_stage;
