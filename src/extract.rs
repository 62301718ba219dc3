//! Certificate extraction from rendered listing pages.
//!
//! This module turns the raw HTML of a certificate listing into structured
//! [`CertificateRecord`]s. Extraction is pure and infallible: malformed rows
//! are dropped silently and a missing table is reported through the
//! `table_found` flag rather than an error, since an empty listing is a
//! degraded-but-valid page state.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use url::Url;

use crate::models::{CertificateRecord, DocumentKind, DocumentLink};

// CSS selector strings
const TABLE_SELECTOR_STR: &str = "table";
const ROW_SELECTOR_STR: &str = "tr";
const CELL_SELECTOR_STR: &str = "td, th";
const LINK_SELECTOR_STR: &str = "a[href]";

/// Number of leading cells that map onto the scalar certificate fields.
const FIELD_CELL_COUNT: usize = 5;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(TABLE_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse table selector '{}': {}",
            TABLE_SELECTOR_STR,
            e
        );
        // Return a safe default selector that matches nothing
        crate::utils::parse_selector_unsafe("*:not(*)", "TABLE_SELECTOR fallback")
    })
});

static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ROW_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!("Failed to parse row selector '{}': {}", ROW_SELECTOR_STR, e);
        crate::utils::parse_selector_unsafe("*:not(*)", "ROW_SELECTOR fallback")
    })
});

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CELL_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse cell selector '{}': {}",
            CELL_SELECTOR_STR,
            e
        );
        crate::utils::parse_selector_unsafe("*:not(*)", "CELL_SELECTOR fallback")
    })
});

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(LINK_SELECTOR_STR).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse link selector '{}': {}",
            LINK_SELECTOR_STR,
            e
        );
        crate::utils::parse_selector_unsafe("*:not(*)", "LINK_SELECTOR fallback")
    })
});

/// Result of extracting certificates from a listing page.
#[derive(Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Certificate rows that carried at least one PDF link
    pub records: Vec<CertificateRecord>,
    /// Whether the page contained a table at all
    pub table_found: bool,
}

/// Extracts certificate records from a rendered listing page.
///
/// Only the first `<table>` on the page is considered; its first row is
/// assumed to be a header and skipped. Rows with fewer than five cells are
/// dropped. The first five cell texts map positionally onto certificate
/// number, company name, country, validity period, and certification body.
/// Every cell of a row is scanned for anchors whose target ends in `.pdf`
/// (case-insensitively); relative targets are resolved against `base` and
/// unparseable targets are dropped. Rows without any document link are
/// dropped entirely.
///
/// # Arguments
///
/// * `html` - Rendered page source
/// * `base` - URL the page was fetched from, for resolving relative links
///
/// # Returns
///
/// An [`Extraction`] with the surviving records and whether a table was
/// present. Calling this twice on the same input yields the same output.
pub fn extract_certificates(html: &str, base: &Url) -> Extraction {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&TABLE_SELECTOR).next() else {
        return Extraction {
            records: Vec::new(),
            table_found: false,
        };
    };

    let mut records = Vec::new();
    for row in table.select(&ROW_SELECTOR).skip(1) {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < FIELD_CELL_COUNT {
            continue;
        }

        let mut fields = cells.iter().take(FIELD_CELL_COUNT).map(cell_text);
        let certificate_number = fields.next().unwrap_or_default();
        let company_name = fields.next().unwrap_or_default();
        let country = fields.next().unwrap_or_default();
        let validity_period = fields.next().unwrap_or_default();
        let certification_body = fields.next().unwrap_or_default();

        let mut document_links = Vec::new();
        for cell in &cells {
            for anchor in cell.select(&LINK_SELECTOR) {
                let Some(href) = anchor.value().attr("href") else {
                    continue;
                };
                if !href.to_lowercase().ends_with(".pdf") {
                    continue;
                }
                match base.join(href) {
                    Ok(url) => {
                        let label = cell_text(&anchor);
                        let kind = DocumentKind::classify(&label);
                        document_links.push(DocumentLink { url, label, kind });
                    }
                    Err(e) => {
                        log::debug!("Skipping unparseable document link '{}': {}", href, e);
                    }
                }
            }
        }

        if document_links.is_empty() {
            continue;
        }

        records.push(CertificateRecord {
            certificate_number,
            company_name,
            country,
            validity_period,
            certification_body,
            document_links,
        });
    }

    Extraction {
        records,
        table_found: true,
    }
}

/// Concatenated, trimmed text content of an element.
fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
