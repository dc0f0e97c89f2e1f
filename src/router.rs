use crate::comps::{CompsRequest, CompsService};
use crate::errors::ServerError;
use crate::responses::{json_error_response, json_response, ResultResp};
use astra::{Request, Response};
use serde_json::json;
use std::io::Read;

pub const SERVICE_NAME: &str = "rental-comps";

/// Handle a request, rendering any error as a JSON error body.
pub fn respond(req: Request, service: &CompsService) -> Response {
    match handle(req, service) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(status = err.status(), error = %err, "request failed");
            json_error_response(err)
        }
    }
}

pub fn handle(mut req: Request, service: &CompsService) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => json_response(
            200,
            &json!({
                "message": "Rental Comps API",
                "version": env!("CARGO_PKG_VERSION"),
                "health": "/api/v1/health",
            }),
        ),
        ("GET", "/api/v1/health") => json_response(
            200,
            &json!({ "status": "healthy", "service": SERVICE_NAME }),
        ),
        ("POST", "/api/v1/comps") => {
            let request = parse_json_body(&mut req)?;
            let response = service.get_comps(&request)?;
            json_response(200, &response)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn parse_json_body(req: &mut Request) -> Result<CompsRequest, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut body)
        .map_err(|e| ServerError::Validation(format!("Could not read request body: {e}")))?;

    serde_json::from_slice(&body)
        .map_err(|e| ServerError::Validation(format!("Invalid request body: {e}")))
}
