mod logging;
mod recovery;

pub use logging::request_logging_middleware;
pub use recovery::{panic_response, timeout_response};
