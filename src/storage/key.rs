//! Object key derivation.
//!
//! Keys group documents by ingestion day:
//! `certificates/<YYYYMMDD>/<certificate-number>_<company>_<kind>.pdf`.
//! Both name components are sanitized so the key stays portable across
//! S3-compatible stores, and the company name is capped to keep keys short.

use chrono::{DateTime, Utc};

use crate::config::{COMPANY_KEY_MAX_LEN, KEY_PREFIX};
use crate::models::{CertificateRecord, DocumentKind};
use crate::utils::{sanitize_key_component, truncate_chars};

/// Derives the object key for one document of a certificate record.
///
/// # Arguments
///
/// * `record` - Certificate the document belongs to
/// * `kind` - Document category, embedded in the file name
/// * `when` - Ingestion time; only the date part ends up in the key
///
/// # Returns
///
/// A key of the form `certificates/<YYYYMMDD>/<number>_<company>_<kind>.pdf`.
pub fn derive_object_key(
    record: &CertificateRecord,
    kind: DocumentKind,
    when: DateTime<Utc>,
) -> String {
    let date = when.format("%Y%m%d");
    let number = sanitize_key_component(&record.certificate_number);
    let company = sanitize_key_component(&truncate_chars(
        &record.company_name,
        COMPANY_KEY_MAX_LEN,
    ));

    format!(
        "{}/{}/{}_{}_{}.pdf",
        KEY_PREFIX,
        date,
        number,
        company,
        kind.as_str()
    )
}
