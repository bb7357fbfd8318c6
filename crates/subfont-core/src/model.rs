//! SVG font document model
//!
//! An SVG font keeps everything under `svg > defs > font`: a `font-face`
//! with the family metrics, a `missing-glyph` fallback, and one `glyph`
//! element per icon. All values are kept as the raw attribute text so a
//! subset can be written back without reinterpreting anything.
//!
//! Decoding is best effort. A syntax error stops the reader, and whatever
//! was collected up to that point is returned; a document whose root is not
//! `<svg>` comes back empty, and anything after the root element is
//! ignored. Bytes that are not UTF-8 are replaced. Callers must cope with
//! empty strings in any field.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, SubsetError};

/// Root `<svg>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontDocument {
    /// Value of the `xmlns` attribute
    pub xmlns: String,
    pub defs: Definitions,
}

/// The `<defs>` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    pub font: Font,
}

/// The `<font>` element and its children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Font {
    pub id: String,
    /// Default advance width (`horiz-adv-x`)
    pub horiz_adv_x: String,
    pub font_face: FontFace,
    pub missing_glyph: MissingGlyph,
    /// Glyphs in document order
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFace {
    pub font_family: String,
    pub units_per_em: String,
    pub ascent: String,
    pub descent: String,
    pub font_weight: String,
    pub font_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingGlyph {
    pub horiz_adv_x: String,
}

/// One `<glyph>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    /// `glyph-name`, the key icon names are matched against
    pub name: String,
    /// `unicode`, already unescaped (`&#xe901;` becomes U+E901)
    pub unicode: String,
    pub horiz_adv_x: String,
    /// Path data, copied verbatim
    pub d: String,
}

impl Glyph {
    pub fn new(name: impl Into<String>, unicode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unicode: unicode.into(),
            ..Self::default()
        }
    }

    pub fn with_advance(mut self, horiz_adv_x: impl Into<String>) -> Self {
        self.horiz_adv_x = horiz_adv_x.into();
        self
    }

    pub fn with_path(mut self, d: impl Into<String>) -> Self {
        self.d = d.into();
        self
    }
}

impl FontDocument {
    /// Decode raw SVG font bytes, replacing anything that is not UTF-8
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        if matches!(text, Cow::Owned(_)) {
            log::warn!("SVG font is not valid UTF-8; invalid bytes were replaced");
        }
        Self::parse(&text)
    }

    /// Decode an SVG font, keeping whatever could be read
    pub fn parse(text: &str) -> Self {
        let mut reader = Reader::from_str(text);
        let mut doc = FontDocument::default();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut root_seen = false;

        loop {
            let (element, is_start) = match reader.read_event() {
                Ok(Event::Start(e)) => (e, true),
                Ok(Event::Empty(e)) => (e, false),
                Ok(Event::End(_)) => {
                    path.pop();
                    continue;
                },
                Ok(Event::Eof) => break,
                Ok(_) => continue,
                Err(err) => {
                    log::warn!(
                        "SVG font is malformed at byte {}, keeping partial data: {}",
                        reader.buffer_position(),
                        err
                    );
                    break;
                },
            };

            let name = element.local_name().as_ref().to_vec();
            if path.is_empty() && root_seen {
                log::debug!("Ignoring content after the root element");
                break;
            }
            if path.is_empty() && name != b"svg" {
                log::warn!(
                    "SVG font root is <{}>, expected <svg>",
                    String::from_utf8_lossy(&name)
                );
                return FontDocument::default();
            }

            if let Err(err) = doc.apply(&path, &name, &element, &reader) {
                log::warn!("SVG font has a malformed attribute, keeping partial data: {}", err);
                break;
            }

            root_seen = true;
            if is_start {
                path.push(name);
            }
        }

        log::info!("Icons in input SVG file: {}", doc.glyph_count());
        doc
    }

    /// Fill in the fields an element contributes, based on where it sits
    fn apply(
        &mut self,
        path: &[Vec<u8>],
        name: &[u8],
        element: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) -> std::result::Result<(), quick_xml::Error> {
        let parents: Vec<&[u8]> = path.iter().map(Vec::as_slice).collect();
        let font = &mut self.defs.font;

        match (parents.as_slice(), name) {
            ([], b"svg") => {
                for (key, value) in attributes(element, reader)? {
                    if key == "xmlns" {
                        self.xmlns = value;
                    }
                }
            },
            ([b"svg", b"defs"], b"font") => {
                for (key, value) in attributes(element, reader)? {
                    match key.as_str() {
                        "id" => font.id = value,
                        "horiz-adv-x" => font.horiz_adv_x = value,
                        _ => {},
                    }
                }
            },
            ([b"svg", b"defs", b"font"], b"font-face") => {
                let face = &mut font.font_face;
                for (key, value) in attributes(element, reader)? {
                    match key.as_str() {
                        "font-family" => face.font_family = value,
                        "units-per-em" => face.units_per_em = value,
                        "ascent" => face.ascent = value,
                        "descent" => face.descent = value,
                        "font-weight" => face.font_weight = value,
                        "font-style" => face.font_style = value,
                        _ => {},
                    }
                }
            },
            ([b"svg", b"defs", b"font"], b"missing-glyph") => {
                for (key, value) in attributes(element, reader)? {
                    if key == "horiz-adv-x" {
                        font.missing_glyph.horiz_adv_x = value;
                    }
                }
            },
            ([b"svg", b"defs", b"font"], b"glyph") => {
                let mut glyph = Glyph::default();
                for (key, value) in attributes(element, reader)? {
                    match key.as_str() {
                        "glyph-name" => glyph.name = value,
                        "unicode" => glyph.unicode = value,
                        "horiz-adv-x" => glyph.horiz_adv_x = value,
                        "d" => glyph.d = value,
                        _ => {},
                    }
                }
                font.glyphs.push(glyph);
            },
            _ => {},
        }
        Ok(())
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.defs.font.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.defs.font.glyphs.len()
    }

    /// Copy of this document with its glyph sequence replaced
    ///
    /// Namespace, font attributes, font-face and missing-glyph carry over
    /// unchanged.
    pub fn with_glyphs(&self, glyphs: Vec<Glyph>) -> FontDocument {
        FontDocument {
            xmlns: self.xmlns.clone(),
            defs: Definitions {
                font: Font {
                    id: self.defs.font.id.clone(),
                    horiz_adv_x: self.defs.font.horiz_adv_x.clone(),
                    font_face: self.defs.font.font_face.clone(),
                    missing_glyph: self.defs.font.missing_glyph.clone(),
                    glyphs,
                },
            },
        }
    }
}

fn attributes(
    element: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> std::result::Result<Vec<(String, String)>, quick_xml::Error> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
            Ok((key, value))
        })
        .collect()
}

/// Read and decode the SVG font at `path`
///
/// Only I/O failure is an error; malformed XML or text degrades to partial data.
pub fn read_font_document(path: &Path) -> Result<FontDocument> {
    let bytes = std::fs::read(path).map_err(|source| SubsetError::FontSource {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FontDocument::parse_bytes(&bytes))
}
