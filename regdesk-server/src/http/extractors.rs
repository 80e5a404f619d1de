//! Custom Axum extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, FailedToBufferBody};
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use serde_json::Value;

use super::error::ApiError;
use crate::models::ClientContext;

/// Hard cap on submission bodies (100 KiB).
///
/// Enforced by `DefaultBodyLimit` on the submit route; buffering stops as
/// soon as the cap is crossed.
pub const MAX_SUBMISSION_BYTES: usize = 100 * 1024;

const FORWARDED_FOR: &str = "x-forwarded-for";
const GEO_COUNTRY: &str = "x-vercel-ip-country";
const GEO_REGION: &str = "x-vercel-ip-country-region";

/// JSON submission body.
///
/// Rejects non-JSON content types before reading, caps the read, treats an
/// empty body as `{}`.
pub struct JsonSubmission(pub Value);

impl<S> FromRequest<S> for JsonSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !header_str(req.headers(), header::CONTENT_TYPE.as_str()).contains("application/json") {
            return Err(ApiError::UnsupportedMediaType);
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| match rejection {
            BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
                tracing::warn!("Submission rejected: body exceeds {} bytes", MAX_SUBMISSION_BYTES);
                ApiError::PayloadTooLarge
            }
            _ => ApiError::InvalidBody,
        })?;

        if bytes.is_empty() {
            return Ok(Self(Value::Object(Default::default())));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| ApiError::InvalidBody)
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let ip = forwarded_ip(headers)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_default();

        Ok(ClientContext {
            ip,
            user_agent: header_str(headers, header::USER_AGENT.as_str()).to_owned(),
            ip_country: header_str(headers, GEO_COUNTRY).trim().to_owned(),
            ip_region: header_str(headers, GEO_REGION).trim().to_owned(),
        })
    }
}

/// First entry of `x-forwarded-for`, if the header is non-empty.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let value = header_str(headers, FORWARDED_FOR);
    if value.is_empty() {
        return None;
    }
    value.split(',').next().map(|first| first.trim().to_owned())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    async fn context(request: HttpRequest<Body>) -> ClientContext {
        let (mut parts, _) = request.into_parts();
        ClientContext::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn forwarded_for_takes_first_entry() {
        let request = HttpRequest::builder()
            .header("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")
            .header("user-agent", "curl/8.0")
            .header("x-vercel-ip-country", " US ")
            .header("x-vercel-ip-country-region", "CA")
            .body(Body::empty())
            .unwrap();

        let ctx = context(request).await;
        assert_eq!(ctx.ip, "203.0.113.7");
        assert_eq!(ctx.user_agent, "curl/8.0");
        assert_eq!(ctx.ip_country, "US");
        assert_eq!(ctx.ip_region, "CA");
    }

    #[tokio::test]
    async fn falls_back_to_peer_address() {
        let mut request = HttpRequest::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 2], 54321))));

        let ctx = context(request).await;
        assert_eq!(ctx.ip, "198.51.100.2");
        assert_eq!(ctx.user_agent, "");
    }

    #[tokio::test]
    async fn no_source_means_empty_ip() {
        let ctx = context(HttpRequest::builder().body(Body::empty()).unwrap()).await;
        assert_eq!(ctx, ClientContext::default());
    }

    #[tokio::test]
    async fn empty_body_is_empty_object() {
        let request = HttpRequest::builder()
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap();

        let JsonSubmission(value) = JsonSubmission::from_request(request, &()).await.ok().unwrap();
        assert_eq!(value, Value::Object(Default::default()));
    }

    #[tokio::test]
    async fn content_type_may_carry_parameters() {
        let request = HttpRequest::builder()
            .header("content-type", "application/json; charset=utf-8")
            .body(Body::from(r#"{"name":"Ada"}"#))
            .unwrap();

        let JsonSubmission(value) = JsonSubmission::from_request(request, &()).await.ok().unwrap();
        assert_eq!(value["name"], "Ada");
    }

    #[tokio::test]
    async fn wrong_content_type_is_rejected() {
        let request = HttpRequest::builder()
            .header("content-type", "text/plain")
            .body(Body::from("{}"))
            .unwrap();

        let err = JsonSubmission::from_request(request, &()).await.err().unwrap();
        assert!(matches!(err, ApiError::UnsupportedMediaType));
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_body() {
        let request = HttpRequest::builder()
            .header("content-type", "application/json")
            .body(Body::from("{name:"))
            .unwrap();

        let err = JsonSubmission::from_request(request, &()).await.err().unwrap();
        assert!(matches!(err, ApiError::InvalidBody));
    }
}
