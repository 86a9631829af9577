//! Submission Gateway: the single place a finalized request leaves the client.

use crate::error::CliError;
use serde::Serialize;
use std::future::Future;
use tracing::error;

/// Await `call` and classify its outcome.
///
/// Failures are logged together with the request payload and returned with the
/// operation prepended. The call is never retried.
pub async fn submit<D, R, F>(operation: &str, request: &D, call: F) -> Result<R, CliError>
where
    D: Serialize,
    F: Future<Output = Result<R, CliError>>,
{
    match call.await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            log_api_error(operation, &err, request);
            Err(err.context(format!("could not {}", operation)))
        }
    }
}

/// Log a failed API call with everything needed to reproduce it.
pub fn log_api_error<D: Serialize>(operation: &str, err: &CliError, request: &D) {
    let payload = serde_json::to_string(request)
        .unwrap_or_else(|e| format!("<unserializable request: {}>", e));
    match err {
        CliError::Remote { status, message } => error!(
            operation = %operation,
            status = *status,
            payload = %payload,
            "failed to {}: {}", operation, message
        ),
        other => error!(
            operation = %operation,
            payload = %payload,
            "failed to {}: {}", operation, other
        ),
    }
}
