/// App context
pub mod app_context;
/// Constants
pub mod constants;
/// Amount and address formatting
pub mod format;
/// Logger
pub mod logger;
