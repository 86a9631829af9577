//! Response classification: success body, remote rejection or transport failure.

use super::models::CommonError;
use crate::error::CliError;
use serde::de::DeserializeOwned;

/// Turn a raw HTTP response into the decoded success model or a classified error.
///
/// Status codes of 300 and above are rejections. Their body is decoded as a
/// [`CommonError`]; when it does not decode, or carries no description, the status
/// line (e.g. `409 Conflict`) is used instead. An empty success body decodes as JSON
/// `null`.
pub fn classify_response<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &[u8],
) -> Result<T, CliError> {
    if status >= 300 {
        let message = serde_json::from_slice::<CommonError>(body)
            .ok()
            .and_then(|err| err.description().map(str::to_string))
            .unwrap_or_else(|| status_text.to_string());
        return Err(CliError::Remote { status, message });
    }

    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| CliError::Transport(format!("failed to decode response: {}", e)))
}

/// Map reqwest failures onto the transport category.
pub fn map_http_error(error: reqwest::Error) -> CliError {
    if error.is_timeout() {
        CliError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        CliError::Transport(format!("Connection error: {}", error))
    } else {
        CliError::Transport(format!("HTTP error: {}", error))
    }
}
