//! Core data model for harvested certificates and their documents.

use chrono::{DateTime, Utc};
use url::Url;

/// One certificate row extracted from the registry listing table.
///
/// The five scalar fields map positionally onto the first five cells of a
/// table row. A record is only kept when at least one PDF link was found in
/// its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    /// Registry-assigned certificate number (first cell)
    pub certificate_number: String,
    /// Certified company name (second cell)
    pub company_name: String,
    /// Company country (third cell)
    pub country: String,
    /// Validity period as printed in the listing (fourth cell)
    pub validity_period: String,
    /// Issuing certification body (fifth cell)
    pub certification_body: String,
    /// PDF links discovered anywhere in the row, in cell order
    pub document_links: Vec<DocumentLink>,
}

/// A single PDF link found in a certificate row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    /// Absolute document URL (relative targets already resolved)
    pub url: Url,
    /// Anchor text of the link, trimmed
    pub label: String,
    /// Document category derived from the anchor text
    pub kind: DocumentKind,
}

/// Category of a certificate document, derived from its link label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Audit reports and audit certificate summaries
    AuditReport,
    /// The certificate document itself
    Certificate,
    /// Anything that matched neither category
    Unknown,
}

impl DocumentKind {
    /// Classifies a link label into a document category.
    ///
    /// The test is a case-insensitive substring match: `audit` or `summary`
    /// means an audit report (checked first, so an "Audit Certificate
    /// Summary" is an audit report), otherwise `certificate` means the
    /// certificate itself, otherwise the kind is unknown.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("audit") || label.contains("summary") {
            DocumentKind::AuditReport
        } else if label.contains("certificate") {
            DocumentKind::Certificate
        } else {
            DocumentKind::Unknown
        }
    }

    /// Stable lowercase form used in object keys and metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::AuditReport => "audit_report",
            DocumentKind::Certificate => "certificate",
            DocumentKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata attached to every uploaded object.
///
/// Stored as user-defined object metadata so a stored PDF can be traced back
/// to its certificate and source URL without opening it.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Registry-assigned certificate number
    pub certificate_number: String,
    /// Certified company name
    pub company_name: String,
    /// Company country
    pub country: String,
    /// Document category
    pub document_kind: DocumentKind,
    /// URL the document was downloaded from
    pub source_url: String,
    /// When this pipeline ingested the document
    pub ingested_at: DateTime<Utc>,
}

impl ObjectMetadata {
    /// Builds metadata for one document of a certificate record.
    pub fn new(record: &CertificateRecord, link: &DocumentLink, ingested_at: DateTime<Utc>) -> Self {
        Self {
            certificate_number: record.certificate_number.clone(),
            company_name: record.company_name.clone(),
            country: record.country.clone(),
            document_kind: link.kind,
            source_url: link.url.to_string(),
            ingested_at,
        }
    }

    /// Flattens the metadata into key/value pairs for the object store.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("certificate_number", self.certificate_number.clone()),
            ("company_name", self.company_name.clone()),
            ("country", self.country.clone()),
            ("pdf_type", self.document_kind.as_str().to_string()),
            ("source_url", self.source_url.clone()),
            ("scraped_date", self.ingested_at.to_rfc3339()),
        ]
    }
}
