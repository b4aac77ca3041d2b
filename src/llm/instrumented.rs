//! LLM provider wrapper that records tracing spans and request metrics.
//!
//! Each call is forwarded exactly once. Failures are recorded and returned
//! unchanged; the caller decides whether to try again.

use super::{GenerationRequest, LlmProvider};
use crate::{Error, Result};
use std::time::{Duration, Instant};

/// Provider wrapper with span and metrics instrumentation.
pub struct InstrumentedProvider<P: LlmProvider> {
    inner: P,
}

impl<P: LlmProvider> InstrumentedProvider<P> {
    /// Wraps a provider.
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    fn record_request_metrics(
        provider: &'static str,
        operation: &'static str,
        elapsed: Duration,
        status: &'static str,
    ) {
        metrics::counter!(
            "llm_requests_total",
            "provider" => provider,
            "operation" => operation,
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "llm_request_duration_ms",
            "provider" => provider,
            "operation" => operation,
            "status" => status
        )
        .record(elapsed.as_secs_f64() * 1000.0);
    }
}

impl<P: LlmProvider> LlmProvider for InstrumentedProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let provider = self.inner.name();
        let operation = request.operation;
        let span = tracing::info_span!(
            "llm.request",
            provider = provider,
            operation = operation,
            status = tracing::field::Empty,
            error = tracing::field::Empty
        );
        let _enter = span.enter();

        let start = Instant::now();
        let result = self.inner.generate(request);
        let elapsed = start.elapsed();

        let status = match &result {
            Ok(_) => "success",
            Err(err) if is_timeout_error(err) => "timeout",
            Err(_) => "error",
        };
        span.record("status", status);
        if let Err(err) = &result {
            span.record("error", tracing::field::display(err));
        }
        Self::record_request_metrics(provider, operation, elapsed, status);

        tracing::debug!(
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status = status,
            "LLM request finished"
        );

        result
    }
}

fn is_timeout_error(err: &Error) -> bool {
    match err {
        Error::Provider { cause, .. } => {
            let lower = cause.to_lowercase();
            lower.contains("timeout") || lower.contains("timed out") || lower.contains("deadline")
        },
        _ => false,
    }
}
