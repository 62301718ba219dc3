//! Object store initialization.
//!
//! Builds the S3 client from the standard AWS environment (credentials,
//! profile, region) with an optional custom endpoint for S3-compatible
//! stores such as MinIO.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};

use crate::config::FALLBACK_REGION;
use crate::storage::ObjectStore;

/// Initializes the object store client.
///
/// Credentials and region come from the default AWS provider chain
/// (environment variables, shared config, instance metadata). When no region
/// is configured anywhere, [`FALLBACK_REGION`] is used so the client can
/// still be constructed.
///
/// # Arguments
///
/// * `bucket` - Destination bucket name.
/// * `endpoint` - Optional custom endpoint URL; enables path-style
///   addressing, which S3-compatible stores expect.
///
/// # Returns
///
/// A ready [`ObjectStore`]. Credential problems surface on the first upload
/// rather than here.
pub async fn init_store(bucket: String, endpoint: Option<String>) -> ObjectStore {
    let region = RegionProviderChain::default_provider().or_else(Region::new(FALLBACK_REGION));
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = endpoint {
        log::debug!("Using custom object store endpoint {endpoint}");
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    let client = aws_sdk_s3::Client::from_conf(builder.build());
    ObjectStore::new(client, bucket)
}
