use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::fonts::register_helvetica;
use super::layout::{PAGE_QR_POSITION, PAGE_QR_SIZE, SIGN_QR_POSITION, SIGN_QR_SIZE, TextField};
use super::page_tree::append_blank_page;
use super::surface::draw_page;
use super::template::{Template, TemplateSource};
use crate::error::{AttestationError, Result};
use crate::payload::{exit_local, format_date, format_payload, format_time, full_address, full_name};
use crate::qr::encode_qr;
use crate::request::AttestationRequest;

/// A finished two-page attestation
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
    generated_at: NaiveDateTime,
}

impl RenderedDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// Suggested download name, e.g. `attestation-2021-04-05_14-30.pdf`
    pub fn file_name(&self) -> String {
        format!("attestation-{}.pdf", self.generated_at.format("%Y-%m-%d_%H-%M"))
    }
}

/// Fills the template for one request at a time. Holds no per-request state,
/// so one renderer can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct AttestationRenderer {
    template: TemplateSource,
}

impl AttestationRenderer {
    pub fn new(template: TemplateSource) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &TemplateSource {
        &self.template
    }

    pub fn render(&self, request: &AttestationRequest) -> Result<RenderedDocument> {
        self.render_at(request, Local::now().naive_local())
    }

    /// Render on tokio's blocking pool
    pub async fn render_on_worker(
        self: Arc<Self>,
        request: AttestationRequest,
    ) -> Result<RenderedDocument> {
        tokio::task::spawn_blocking(move || self.render(&request))
            .await
            .map_err(|e| AttestationError::WorkerFailed(e.to_string()))?
    }

    pub fn render_at(
        &self,
        request: &AttestationRequest,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedDocument> {
        let payload = format_payload(request, generated_at);
        debug!(bytes = payload.len(), "formatted QR payload");

        let Template {
            mut document,
            page_id: form_page,
            media_box,
        } = self.template.load()?;
        let font = register_helvetica(&mut document);

        let exit = exit_local(request);
        let sign_qr = encode_qr(&payload, SIGN_QR_SIZE)?;
        draw_page(&mut document, form_page, font.clone(), |surface| {
            surface.write_field(TextField::FullName, &full_name(request));
            surface.write_field(TextField::BirthDate, &format_date(request.birth_date));
            surface.write_field(TextField::BirthPlace, &request.birth_place);
            surface.write_field(TextField::Address, &full_address(request));
            surface.write_field(TextField::SignCity, &request.city);
            surface.write_field(TextField::ExitDate, &format_date(exit.date()));
            surface.write_field(TextField::ExitTime, &format_time(exit));

            for reason in &request.reasons {
                surface.write_checkbox(*reason);
            }

            surface.embed_qr(&sign_qr, SIGN_QR_POSITION)
        })?;
        debug!(reasons = request.reasons.len(), "filled form page");

        let qr_page = append_blank_page(&mut document, media_box)?;
        let page_qr = encode_qr(&payload, PAGE_QR_SIZE)?;
        draw_page(&mut document, qr_page, font, |surface| {
            surface.embed_qr(&page_qr, PAGE_QR_POSITION)
        })?;
        debug!("drew QR page");

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| AttestationError::SerializationFailure(e.to_string()))?;

        let rendered = RenderedDocument {
            bytes,
            generated_at,
        };
        info!(
            file = %rendered.file_name(),
            size = rendered.bytes.len(),
            "rendered attestation"
        );
        Ok(rendered)
    }
}
