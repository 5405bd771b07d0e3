//! Regenerate a blank attestation form whose artwork lines up with the fixed
//! coordinates the renderer writes to.
//!
//! cargo run --example create_template -- assets/attestation_template.pdf

use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point, Pt};
use std::io::BufWriter;

const REASONS: [(f32, &str); 9] = [
    (577.0, "Deplacements entre le domicile et le lieu de travail"),
    (532.0, "Achats de premiere necessite"),
    (476.0, "Consultations et soins"),
    (435.0, "Motif familial imperieux"),
    (395.0, "Personnes en situation de handicap"),
    (356.0, "Activite physique et animaux de compagnie"),
    (292.0, "Convocation judiciaire ou administrative"),
    (254.0, "Missions d'interet general"),
    (209.0, "Accompagnement des enfants"),
];

fn pt(v: f32) -> Mm {
    Pt(v).into()
}

fn square(x: f32, y: f32, side: f32) -> Line {
    Line {
        points: vec![
            (Point::new(pt(x), pt(y)), false),
            (Point::new(pt(x + side), pt(y)), false),
            (Point::new(pt(x + side), pt(y + side)), false),
            (Point::new(pt(x), pt(y + side)), false),
        ],
        is_closed: true,
    }
}

fn main() {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "attestation_template.pdf".to_string());

    let (doc, page1, layer1) =
        PdfDocument::new("Attestation de deplacement", pt(595.0), pt(842.0), "Form");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font_bold_ref = doc.add_builtin_font(BuiltinFont::HelveticaBold).unwrap();
    let font_ref = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();

    layer.use_text("ATTESTATION DE DEPLACEMENT DEROGATOIRE", 14.0, pt(120.0), pt(780.0), &font_bold_ref);
    layer.use_text("Je soussigne(e),", 11.0, pt(50.0), pt(715.0), &font_ref);
    layer.use_text("Mme/M. :", 11.0, pt(50.0), pt(695.0), &font_ref);
    layer.use_text("Ne(e) le :", 11.0, pt(50.0), pt(673.0), &font_ref);
    layer.use_text("a :", 11.0, pt(280.0), pt(673.0), &font_ref);
    layer.use_text("Demeurant :", 11.0, pt(50.0), pt(651.0), &font_ref);
    layer.use_text(
        "certifie que mon deplacement est lie au motif suivant :",
        11.0,
        pt(50.0),
        pt(620.0),
        &font_ref,
    );

    layer.set_outline_thickness(0.5);
    for (y, label) in REASONS {
        layer.add_line(square(74.0, y - 2.0, 14.0));
        layer.use_text(label, 11.0, pt(100.0), pt(y), &font_ref);
    }

    layer.use_text("Fait a :", 11.0, pt(50.0), pt(175.0), &font_ref);
    layer.use_text("Le :", 11.0, pt(50.0), pt(152.0), &font_ref);
    layer.use_text("a :", 11.0, pt(230.0), pt(152.0), &font_ref);
    layer.add_line(square(425.0, 90.0, 130.0));
    layer.use_text("Signature", 9.0, pt(460.0), pt(225.0), &font_ref);

    let file = std::fs::File::create(&output).unwrap();
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).unwrap();
    println!("Created {}", output);
}
