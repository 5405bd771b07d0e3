use std::fs;
use std::path::PathBuf;

use lopdf::{Document, ObjectId};

use super::page_tree::media_box;
use crate::error::{AttestationError, Result};

static BUNDLED_TEMPLATE: &[u8] = include_bytes!("../../assets/attestation_template.pdf");

/// Where the blank one-page form comes from
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    /// Asset compiled into the binary
    #[default]
    Bundled,
    File(PathBuf),
    Memory(Vec<u8>),
}

/// An editable copy of the template and its single page
pub struct Template {
    pub document: Document,
    pub page_id: ObjectId,
    pub media_box: [f32; 4],
}

impl TemplateSource {
    pub fn load(&self) -> Result<Template> {
        let document = match self {
            TemplateSource::Bundled => parse(BUNDLED_TEMPLATE, "bundled template"),
            TemplateSource::File(path) => {
                let bytes = fs::read(path).map_err(|e| {
                    AttestationError::TemplateUnavailable(format!("cannot read {:?}: {}", path, e))
                })?;
                parse(&bytes, &path.display().to_string())
            }
            TemplateSource::Memory(bytes) => parse(bytes, "in-memory template"),
        }?;

        let pages = document.get_pages();
        if pages.len() != 1 {
            return Err(AttestationError::TemplateUnavailable(format!(
                "expected exactly one page, found {}",
                pages.len()
            )));
        }
        let page_id = *pages.values().next().ok_or_else(|| {
            AttestationError::TemplateUnavailable("template has no pages".into())
        })?;
        let media_box = media_box(&document, page_id)?;

        Ok(Template {
            document,
            page_id,
            media_box,
        })
    }
}

fn parse(bytes: &[u8], origin: &str) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| {
        AttestationError::TemplateUnavailable(format!("failed to parse {}: {}", origin, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_template_loads() {
        let template = TemplateSource::Bundled.load().unwrap();
        assert_eq!(template.media_box, [0.0, 0.0, 595.0, 842.0]);
        assert_eq!(template.document.get_pages().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let source = TemplateSource::File(PathBuf::from("/nonexistent/attestation.pdf"));
        let result = source.load();
        assert!(matches!(result, Err(AttestationError::TemplateUnavailable(_))));
    }

    #[test]
    fn test_corrupt_bytes() {
        let source = TemplateSource::Memory(b"definitely not a pdf".to_vec());
        let result = source.load();
        assert!(matches!(result, Err(AttestationError::TemplateUnavailable(_))));
    }

    #[test]
    fn test_two_page_template_rejected() {
        let mut template = TemplateSource::Bundled.load().unwrap();
        crate::pdf::page_tree::append_blank_page(&mut template.document, template.media_box)
            .unwrap();
        let mut bytes = Vec::new();
        template.document.save_to(&mut bytes).unwrap();

        let result = TemplateSource::Memory(bytes).load();
        assert!(matches!(result, Err(AttestationError::TemplateUnavailable(_))));
    }
}
