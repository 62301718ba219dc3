//! Object storage integration.
//!
//! This module provides:
//! - Object key derivation for harvested documents
//! - An uploader over the AWS S3 SDK that also talks to any S3-compatible
//!   store (MinIO and friends) via an endpoint override

mod key;

// Re-export public API
pub use key::derive_object_key;

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::error_handling::StoreError;
use crate::models::ObjectMetadata;

/// Uploader bound to one destination bucket.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl ObjectStore {
    /// Creates an uploader from a configured SDK client and bucket name.
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Destination bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Uploads one PDF document under the given key.
    ///
    /// The object is stored with content type `application/pdf` and the
    /// flattened [`ObjectMetadata`] pairs as user-defined metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] carrying the full SDK error chain when the
    /// store rejects the write.
    pub async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        metadata: &ObjectMetadata,
    ) -> Result<(), StoreError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/pdf")
            .body(ByteStream::from(bytes));

        for (name, value) in metadata.pairs() {
            request = request.metadata(name, value);
        }

        request.send().await.map_err(|e| StoreError {
            key: key.to_string(),
            message: format!("{}", DisplayErrorContext(&e)),
        })?;

        Ok(())
    }
}
