mod request;
mod response;
mod service;

pub use request::CompsRequest;
pub use response::ErrorResponse;
pub use service::CompsService;
