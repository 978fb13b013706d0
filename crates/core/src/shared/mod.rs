pub mod aws_context;
pub mod constants;
pub mod remote_error;
pub mod timestamp;
