use lopdf::{Dictionary, Document, Object, ObjectId};

/// Resource name of the overlay font.
///
/// Distinct from the names templates usually pick (`F1`, `F2`...) so the
/// template's own fonts stay untouched when resources are merged.
pub const OVERLAY_FONT_NAME: &str = "AttHelv";

/// A font registered in the document and the name content streams use for it
#[derive(Debug, Clone)]
pub struct FontRef {
    pub id: ObjectId,
    pub name: String,
}

/// Register Helvetica with WinAnsi encoding
pub fn register_helvetica(doc: &mut Document) -> FontRef {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", "Font");
    font_dict.set("Subtype", "Type1");
    font_dict.set("BaseFont", "Helvetica");
    font_dict.set("Encoding", "WinAnsiEncoding");

    let id = doc.add_object(Object::Dictionary(font_dict));
    FontRef {
        id,
        name: OVERLAY_FONT_NAME.to_string(),
    }
}

/// Encode text as a hex string in WinAnsi (CP1252) byte values.
///
/// Latin-1 maps one to one; the CP1252 extras in 0x80..0x9F are looked up.
/// Anything else becomes `?`.
pub fn encode_win_ansi(s: &str) -> String {
    s.chars()
        .map(|c| format!("{:02X}", win_ansi_byte(c)))
        .collect::<Vec<_>>()
        .join("")
}

fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}
