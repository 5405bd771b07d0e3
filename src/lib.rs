//! Fill the travel attestation template for one request and return the
//! finished two-page PDF.
//!
//! ```no_run
//! use attestation_print::{AttestationRenderer, TemplateSource};
//! # fn demo(request: attestation_print::AttestationRequest) -> attestation_print::Result<()> {
//! let renderer = AttestationRenderer::new(TemplateSource::Bundled);
//! let document = renderer.render(&request)?;
//! std::fs::write(document.file_name(), document.as_bytes()).ok();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payload;
pub mod pdf;
pub mod qr;
pub mod request;

pub use error::{AttestationError, Result};
pub use pdf::{AttestationRenderer, RenderedDocument, TemplateSource};
pub use request::{AttestationRequest, Reason};
