//! Drawing surface over one page.
//!
//! Drawing operations accumulate in memory and only touch the page when the
//! surface is closed. A surface dropped without `close` leaves the page as it
//! was, apart from unreferenced image objects.

use std::io::Write;

use image::GrayImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::fonts::{FontRef, encode_win_ansi};
use super::layout::{
    CHECK_MARK, CHECKBOX_FONT_SIZE, Point, TEXT_FONT_SIZE, TextField, checkbox_position,
};
use super::resources::merge_page_resources;
use crate::error::{AttestationError, Result};
use crate::request::Reason;

pub struct PageSurface<'a> {
    doc: &'a mut Document,
    page_id: ObjectId,
    font: FontRef,
    content_parts: Vec<String>,
    xobjects: Dictionary,
}

impl<'a> PageSurface<'a> {
    pub fn open(doc: &'a mut Document, page_id: ObjectId, font: FontRef) -> Self {
        Self {
            doc,
            page_id,
            font,
            content_parts: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    /// Draw a single line of text with its baseline at `at`
    pub fn write_text(&mut self, value: &str, at: Point, font_size: f32) {
        self.content_parts.push(format!(
            "BT 0 g /{} {} Tf {} {} Td <{}> Tj ET\n",
            self.font.name,
            font_size,
            at.x,
            at.y,
            encode_win_ansi(value)
        ));
    }

    pub fn write_field(&mut self, field: TextField, value: &str) {
        self.write_text(value, field.position(), TEXT_FONT_SIZE);
    }

    pub fn write_checkbox(&mut self, reason: Reason) {
        self.write_text(CHECK_MARK, checkbox_position(reason), CHECKBOX_FONT_SIZE);
    }

    /// Embed a grayscale bitmap at `at`, one point per pixel
    pub fn embed_qr(&mut self, bitmap: &GrayImage, at: Point) -> Result<()> {
        let (width, height) = bitmap.dimensions();
        let compressed_bytes = compress_data(bitmap.as_raw())
            .map_err(|e| AttestationError::Render(format!("failed to compress QR image: {}", e)))?;

        let mut img_dict = Dictionary::new();
        img_dict.set("Type", "XObject");
        img_dict.set("Subtype", "Image");
        img_dict.set("Width", width as i64);
        img_dict.set("Height", height as i64);
        img_dict.set("ColorSpace", "DeviceGray");
        img_dict.set("BitsPerComponent", 8_i64);
        img_dict.set("Filter", "FlateDecode");

        let img_id = self.doc.add_object(Stream::new(img_dict, compressed_bytes));
        let img_name = format!("AttIm{}", img_id.0);
        self.xobjects.set(img_name.clone(), Object::Reference(img_id));

        self.content_parts.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            width, height, at.x, at.y, img_name
        ));
        Ok(())
    }

    /// Commit the overlay to the page.
    ///
    /// The page's existing content streams are wrapped in `q`/`Q` so whatever
    /// graphics state they leave behind does not leak into the overlay.
    pub fn close(self) -> Result<()> {
        if self.content_parts.is_empty() {
            return Ok(());
        }

        let existing = match self.doc.get_dictionary(self.page_id) {
            Ok(page) => match page.get(b"Contents") {
                // An indirect Contents may be a single stream or an array of them.
                Ok(Object::Reference(id)) => match self.doc.get_object(*id) {
                    Ok(Object::Array(refs)) => refs.clone(),
                    _ => vec![Object::Reference(*id)],
                },
                Ok(Object::Array(refs)) => refs.clone(),
                _ => Vec::new(),
            },
            Err(e) => {
                return Err(AttestationError::Render(format!(
                    "page {:?}: {}",
                    self.page_id, e
                )));
            }
        };

        let mut overlay = Vec::new();
        let mut contents = Vec::with_capacity(existing.len() + 2);
        if !existing.is_empty() {
            let save_id = self.doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
            contents.push(Object::Reference(save_id));
            contents.extend(existing);
            overlay.extend_from_slice(b"\nQ\n");
        }
        overlay.extend_from_slice(self.content_parts.concat().as_bytes());
        let overlay_id = self.doc.add_object(Stream::new(Dictionary::new(), overlay));
        contents.push(Object::Reference(overlay_id));

        self.doc
            .get_dictionary_mut(self.page_id)
            .map_err(|e| AttestationError::Render(format!("page {:?}: {}", self.page_id, e)))?
            .set("Contents", contents);

        merge_page_resources(self.doc, self.page_id, &self.font, &self.xobjects)
    }
}

/// Open a surface on `page_id`, draw with `draw`, then close it.
///
/// If `draw` fails the surface is dropped without touching the page.
pub fn draw_page<F>(doc: &mut Document, page_id: ObjectId, font: FontRef, draw: F) -> Result<()>
where
    F: FnOnce(&mut PageSurface<'_>) -> Result<()>,
{
    let mut surface = PageSurface::open(doc, page_id, font);
    draw(&mut surface)?;
    surface.close()
}

/// Compress data using zlib/flate2
pub fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pdf::fonts::register_helvetica;
    use crate::qr::encode_qr;
    use lopdf::dictionary;
    use std::io::Read;

    /// Inflate a FlateDecode stream body.
    ///
    /// lopdf refuses to decompress image XObjects, so image data is read back
    /// through flate2 directly.
    pub(crate) fn inflate(data: &[u8]) -> Vec<u8> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        out
    }

    fn page_with_content() -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"1 0 0 1 50 50 cm".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
            "Resources" => Dictionary::new(),
        });
        (doc, page_id)
    }

    fn page_text(doc: &Document, page_id: ObjectId) -> String {
        String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
    }

    #[test]
    fn test_write_field_and_checkbox() {
        let (mut doc, page_id) = page_with_content();
        let font = register_helvetica(&mut doc);

        draw_page(&mut doc, page_id, font, |surface| {
            surface.write_field(TextField::ExitTime, "14:30");
            surface.write_checkbox(Reason::Health);
            Ok(())
        })
        .unwrap();

        let text = page_text(&doc, page_id);
        assert!(text.contains("/AttHelv 12 Tf 255 152 Td <31343A3330> Tj"));
        assert!(text.contains("/AttHelv 20 Tf 77 476 Td <78> Tj"));
    }

    #[test]
    fn test_existing_content_is_isolated() {
        let (mut doc, page_id) = page_with_content();
        let font = register_helvetica(&mut doc);

        draw_page(&mut doc, page_id, font, |surface| {
            surface.write_text("a", Point { x: 1.0, y: 2.0 }, 9.0);
            Ok(())
        })
        .unwrap();

        let text = page_text(&doc, page_id);
        assert!(text.starts_with("q\n1 0 0 1 50 50 cm"));
        let restore = text.find("Q\n").unwrap();
        let overlay = text.find("BT").unwrap();
        assert!(restore < overlay);
    }

    #[test]
    fn test_indirect_contents_array_is_flattened() {
        let mut doc = Document::with_version("1.5");
        let first = doc.add_object(Stream::new(Dictionary::new(), b"1 0 0 1 50 50 cm".to_vec()));
        let second = doc.add_object(Stream::new(Dictionary::new(), b" 0 g".to_vec()));
        let array_id = doc.add_object(Object::Array(vec![first.into(), second.into()]));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => array_id,
            "Resources" => Dictionary::new(),
        });
        let font = register_helvetica(&mut doc);

        draw_page(&mut doc, page_id, font, |surface| {
            surface.write_checkbox(Reason::Family);
            Ok(())
        })
        .unwrap();

        let contents = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Contents")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(contents.len(), 4);
        assert_eq!(contents[1].as_reference().unwrap(), first);
        assert_eq!(contents[2].as_reference().unwrap(), second);
        for entry in &contents {
            let id = entry.as_reference().unwrap();
            assert!(doc.get_object(id).unwrap().as_stream().is_ok());
        }

        let text = page_text(&doc, page_id);
        assert!(text.starts_with("q\n1 0 0 1 50 50 cm 0 g"));
        assert!(text.contains("/AttHelv 20 Tf 77 435 Td <78> Tj"));
    }

    #[test]
    fn test_embed_qr_registers_image() {
        let (mut doc, page_id) = page_with_content();
        let font = register_helvetica(&mut doc);
        let bitmap = encode_qr("Motifs: travail", 120).unwrap();

        draw_page(&mut doc, page_id, font, |surface| {
            surface.embed_qr(&bitmap, Point { x: 430.0, y: 95.0 })
        })
        .unwrap();

        let text = page_text(&doc, page_id);
        assert!(text.contains("q 120 0 0 120 430 95 cm /AttIm"));

        let resources = doc.get_dictionary(page_id).unwrap().get(b"Resources").unwrap();
        let xobjects = resources.as_dict().unwrap().get(b"XObject").unwrap().as_dict().unwrap();
        assert_eq!(xobjects.len(), 1);
        let (_, image_ref) = xobjects.iter().next().unwrap();
        let image = doc
            .get_object(image_ref.as_reference().unwrap())
            .unwrap()
            .as_stream()
            .unwrap();
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 120);
        assert_eq!(&inflate(&image.content), bitmap.as_raw());
    }

    #[test]
    fn test_failed_draw_leaves_page_untouched() {
        let (mut doc, page_id) = page_with_content();
        let font = register_helvetica(&mut doc);
        let before = page_text(&doc, page_id);

        let result = draw_page(&mut doc, page_id, font, |surface| {
            surface.write_checkbox(Reason::Work);
            surface.embed_qr(&encode_qr(&"x".repeat(4000), 300)?, Point { x: 0.0, y: 0.0 })
        });

        assert!(matches!(result, Err(AttestationError::EncodingOverflow(_))));
        assert_eq!(page_text(&doc, page_id), before);
    }

    #[test]
    fn test_empty_surface_is_noop() {
        let (mut doc, page_id) = page_with_content();
        let font = register_helvetica(&mut doc);
        draw_page(&mut doc, page_id, font, |_| Ok(())).unwrap();
        assert_eq!(page_text(&doc, page_id), "1 0 0 1 50 50 cm");
    }
}
