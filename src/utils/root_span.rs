use axum::http::StatusCode;
use tracing::{field, info_span, Span};

use crate::storage::TodoId;

/// Span opened per request by the `trace_root` middleware; handlers fill
/// in the fields they learn about.
#[derive(Clone, Debug)]
pub struct RootSpan {
    span: Span,
}

impl RootSpan {
    pub fn new(method: &str, uri: &str) -> Self {
        Self {
            span: info_span!(
                "http_request",
                sampling.priority = tracing::field::Empty,
                method = %method,
                uri    = %uri,
                http_status_code = tracing::field::Empty,
                status = tracing::field::Empty,
                todo_id = tracing::field::Empty,
                todo_count = tracing::field::Empty,
            ),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn record(&self) -> RootSpanRecorder {
        RootSpanRecorder::new(&self.span)
    }
}

pub struct RootSpanRecorder<'a> {
    span: &'a Span,
}

impl<'a> RootSpanRecorder<'a> {
    pub fn new(span: &'a Span) -> Self {
        Self { span }
    }

    pub fn http_status_code(&self, status_code: &StatusCode) -> &Self {
        self.span.record("http_status_code", status_code.as_u16());
        self
    }

    pub fn status(&self, value: &str) -> &Self {
        self.span.record("status", field::display(value));
        self
    }

    pub fn todo_id(&self, id: &TodoId) -> &Self {
        self.span.record("todo_id", field::display(id));
        self
    }

    pub fn todo_count(&self, count: usize) -> &Self {
        self.span.record("todo_count", count as u64);
        self
    }

    /// Asks the trace sampler to keep this request regardless of ratio.
    pub fn force_sampling(&self) -> &Self {
        self.span.record("sampling.priority", 1_u64);
        self
    }
}
