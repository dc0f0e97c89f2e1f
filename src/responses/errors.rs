use crate::comps::ErrorResponse;
use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Render a ServerError as a `{code, message}` JSON body.
pub fn json_error_response(err: ServerError) -> Response {
    let status = err.status();
    let body = serde_json::to_string(&ErrorResponse::from(&err))
        .unwrap_or_else(|_| r#"{"message":"Internal server error"}"#.to_string());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.clone()))
        .unwrap_or_else(|_| Response::new(Body::from(body)))
}
