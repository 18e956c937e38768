//! Outbound HTTP calls that carry the caller's trace.
//!
//! Every request gets a W3C `traceparent` (and `tracestate`, when present)
//! for the current span, plus an `x-request-id` so the service logs can be
//! joined with the caller's.

use opentelemetry::trace::TraceContextExt;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::middleware::tracing::REQUEST_ID_HEADER;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// `traceparent` for the current span, or `None` outside an OpenTelemetry trace.
pub fn current_traceparent() -> Option<String> {
    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();

    span_context.is_valid().then(|| {
        format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        )
    })
}

/// Headers attached to every outbound call.
pub fn outbound_headers(request_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    if let Some(traceparent) = current_traceparent()
        && let Ok(value) = HeaderValue::from_str(&traceparent)
    {
        headers.insert(TRACEPARENT_HEADER, value);

        let context = Span::current().context();
        let tracestate = context.span().span_context().trace_state().header();
        if !tracestate.is_empty()
            && let Ok(value) = HeaderValue::from_str(&tracestate)
        {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }

    headers
}

/// A `reqwest` request that adds [`outbound_headers`] when sent.
pub struct TracedRequest {
    request: reqwest::RequestBuilder,
    request_id: String,
}

impl TracedRequest {
    pub fn new(request: reqwest::RequestBuilder) -> Self {
        Self {
            request,
            request_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn form<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.request = self.request.form(body);
        self
    }

    pub fn bearer_auth<T: std::fmt::Display>(mut self, token: T) -> Self {
        self.request = self.request.bearer_auth(token);
        self
    }

    pub async fn send(self) -> Result<reqwest::Response, reqwest::Error> {
        tracing::debug!(request_id = %self.request_id, "Sending outbound request");
        self.request
            .headers(outbound_headers(&self.request_id))
            .send()
            .await
    }
}

pub trait TracedClientExt {
    fn traced_get(&self, url: &str) -> TracedRequest;
    fn traced_post(&self, url: &str) -> TracedRequest;
}

impl TracedClientExt for reqwest::Client {
    fn traced_get(&self, url: &str) -> TracedRequest {
        TracedRequest::new(self.get(url))
    }

    fn traced_post(&self, url: &str) -> TracedRequest {
        TracedRequest::new(self.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_trace_headers_outside_a_trace() {
        assert!(current_traceparent().is_none());

        let headers = outbound_headers("req-1");
        assert!(!headers.contains_key(TRACEPARENT_HEADER));
        assert!(!headers.contains_key(TRACESTATE_HEADER));
    }

    #[test]
    fn request_id_is_always_sent() {
        let headers = outbound_headers("req-42");
        assert_eq!(headers[REQUEST_ID_HEADER], "req-42");
    }
}
