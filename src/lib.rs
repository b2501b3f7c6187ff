//! Composes single-page medical rest certificates as PDF documents.
//!
//! A certificate is rendered from a validated [CertificateData] record, a
//! shared [LayoutConfig] and a shared [FontRegistry](fonts::FontRegistry).
//! Rendering is a pure function of those three: the same inputs always
//! produce the same bytes, and missing fonts or a missing signature image
//! degrade to built-in substitutes instead of failing.
//!
//! ```
//! use medcert::{render, CertificateData, LayoutConfig};
//! use medcert::fonts::FontRegistry;
//! use chrono::NaiveDate;
//!
//! let data = CertificateData {
//!     name: "Jorge".into(),
//!     last_name: "Jara".into(),
//!     national_id: "33824963".into(),
//!     diagnostic_code: "B349".into(),
//!     rest_hours: 24,
//!     free_text: "Sindrome gripal".into(),
//!     issue_date: NaiveDate::from_ymd_opt(2024, 5, 10),
//! };
//! let pdf = render(&data, &LayoutConfig::default(), &FontRegistry::new()).unwrap();
//! assert!(pdf.as_bytes().starts_with(b"%PDF-"));
//! ```

mod certificate;
pub use certificate::*;

mod colour;
pub use colour::*;

mod command;
pub use command::*;

mod compose;
pub use compose::{compose, filler_count, Assets};

/// The certificate layout and caller overrides
pub mod config;
pub use config::{LayoutConfig, LayoutOverrides};

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod filename;
pub use filename::*;

/// Font registration, fallback and measurement
pub mod fonts;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod margins;
pub use margins::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod transform;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;

use fonts::FontRegistry;

/// One finished certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    bytes: Vec<u8>,
}

impl RenderResult {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Render one certificate to PDF.
///
/// The issue date is fixed once, up front, so a render that straddles
/// midnight prints and records a single date. Font and signature image
/// problems are absorbed by fallbacks; only a failure to produce the
/// document itself is returned, as [Error::RenderFailed].
pub fn render(
    data: &CertificateData,
    config: &LayoutConfig,
    fonts: &FontRegistry,
) -> Result<RenderResult, Error> {
    let issue_date = data.issue_date_or_today();
    let data = CertificateData {
        issue_date: Some(issue_date),
        ..data.clone()
    };

    let assets = Assets::load(config);
    let commands = compose(&data, config, fonts, &assets);

    let mut info = Info::new();
    info.title(format!("Certificado médico - {}", data.full_name()))
        .author(&config.practitioner.name)
        .subject("Certificado de reposo")
        .creation_date(issue_date);

    let mut bytes = Vec::new();
    Document {
        info: Some(info),
        width: config.width,
        height: config.height,
        commands: &commands,
        fonts,
        image: assets.signature.as_ref(),
    }
    .write(&mut bytes)
    .map_err(Error::render_failed)?;

    log::debug!("rendered certificate: {} bytes", bytes.len());
    Ok(RenderResult { bytes })
}
