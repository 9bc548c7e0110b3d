//! Echo the request id back to clients.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};
use tracing_actix_web::RequestId;

/// Header carrying the request id on every response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sets `X-Request-ID` on the response.
///
/// An id supplied by the client (or a load balancer) is reused; otherwise the
/// id `TracingLogger` assigned to this request is used, so a client report can
/// be matched to the server logs. Must be registered inside `TracingLogger`.
pub async fn propagate_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let incoming = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty())
        .cloned();

    let request_id = match incoming {
        Some(value) => {
            tracing::debug!(client_request_id = ?value, "Reusing client request id");
            Some(value)
        }
        None => req
            .extensions()
            .get::<RequestId>()
            .and_then(|id| HeaderValue::from_str(&id.to_string()).ok()),
    };

    let mut res = next.call(req).await?;

    if let Some(value) = request_id {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(res)
}
