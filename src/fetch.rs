//! Certificate document downloading and validation.
//!
//! Downloads go through the shared HTTP client, so they carry the same
//! browser-like headers and timeout as every other request. A download only
//! counts once the body passes the PDF signature check; anything else is
//! rejected before it can reach the object store.

use url::Url;

use crate::error_handling::FetchError;

/// Leading bytes of every well-formed PDF document.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Downloads one certificate document and validates it is a PDF.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (browser-like headers, bounded timeout)
/// * `url` - Absolute document URL
///
/// # Returns
///
/// The raw document bytes on success.
///
/// # Errors
///
/// Returns [`FetchError::Transport`] when the request cannot be completed,
/// [`FetchError::Status`] on a non-success response, and
/// [`FetchError::NotAPdf`] when the body does not start with `%PDF`.
pub async fn download_document(
    client: &reqwest::Client,
    url: &Url,
) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    if !body.starts_with(PDF_MAGIC) {
        return Err(FetchError::NotAPdf {
            url: url.to_string(),
        });
    }

    Ok(body.to_vec())
}
