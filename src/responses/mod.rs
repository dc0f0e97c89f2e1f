pub mod errors;
pub mod json;

pub use errors::{json_error_response, ResultResp};
pub use json::json_response;
