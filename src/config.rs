//! Input plumbing for the command-line front end.
//!
//! This module handles:
//! - Loading and parsing request files (JSON, same shape as the HTTP payload)
//! - Rejecting requests with blank fields or no reason before rendering
//! - Resolving the template source from the command-line override

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::AttestationError;
use crate::pdf::TemplateSource;
use crate::request::AttestationRequest;

/// Helper function to open a file with consistent error context
fn open_file_with_context(path: &Path, description: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {} at {:?}", description, path))
}

pub fn parse_request<R: Read>(reader: R) -> Result<AttestationRequest> {
    let request: AttestationRequest =
        serde_json::from_reader(reader).with_context(|| "Failed to parse request")?;
    validate_request(&request)?;
    Ok(request)
}

pub fn load_request(path: &Path) -> Result<AttestationRequest> {
    let file = open_file_with_context(path, "request file")?;
    parse_request(BufReader::new(file)).with_context(|| format!("Invalid request in {:?}", path))
}

/// Check the constraints the renderer relies on: every text field has
/// content and at least one reason is selected.
pub fn validate_request(request: &AttestationRequest) -> Result<(), AttestationError> {
    let fields = [
        ("firstname", &request.first_name),
        ("lastname", &request.last_name),
        ("birthPlace", &request.birth_place),
        ("city", &request.city),
        ("postalCode", &request.postal_code),
        ("address", &request.address),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AttestationError::InputInvalid(format!("{} must not be blank", name)));
        }
    }
    if request.reasons.is_empty() {
        return Err(AttestationError::InputInvalid(
            "at least one reason is required".into(),
        ));
    }
    Ok(())
}

pub fn template_source(path: Option<PathBuf>) -> TemplateSource {
    match path {
        Some(path) => TemplateSource::File(path),
        None => TemplateSource::Bundled,
    }
}
