//! Subset SVG emission
//!
//! Serializes a [`FontDocument`] back to the `svg > defs > font` shape it
//! was read from. The XML declaration and DOCTYPE are fixed text written
//! ahead of the body.

use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::{Result, SubsetError};
use crate::model::FontDocument;

/// Written verbatim before the `<svg>` element
pub const SVG_PREAMBLE: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" >"#,
    "\n",
);

fn serialize_err(err: impl std::fmt::Display) -> SubsetError {
    SubsetError::Serialize(err.to_string())
}

/// Build an element, skipping attributes that are empty
fn element<'a>(name: &'a str, attrs: &[(&str, &String)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        if !value.is_empty() {
            start.push_attribute((*key, value.as_str()));
        }
    }
    start
}

/// Render `document` as a complete SVG font
pub fn render_subset(document: &FontDocument) -> Result<String> {
    let font = &document.defs.font;
    let face = &font.font_face;
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let events = [
        Event::Start(element("svg", &[("xmlns", &document.xmlns)])),
        Event::Start(BytesStart::new("defs")),
        Event::Start(element(
            "font",
            &[("id", &font.id), ("horiz-adv-x", &font.horiz_adv_x)],
        )),
        Event::Empty(element(
            "font-face",
            &[
                ("font-family", &face.font_family),
                ("units-per-em", &face.units_per_em),
                ("ascent", &face.ascent),
                ("descent", &face.descent),
                ("font-weight", &face.font_weight),
                ("font-style", &face.font_style),
            ],
        )),
        Event::Empty(element(
            "missing-glyph",
            &[("horiz-adv-x", &font.missing_glyph.horiz_adv_x)],
        )),
    ];
    for event in events {
        writer.write_event(event).map_err(serialize_err)?;
    }

    for glyph in &font.glyphs {
        let start = element(
            "glyph",
            &[
                ("glyph-name", &glyph.name),
                ("unicode", &glyph.unicode),
                ("horiz-adv-x", &glyph.horiz_adv_x),
                ("d", &glyph.d),
            ],
        );
        writer.write_event(Event::Empty(start)).map_err(serialize_err)?;
    }

    for name in ["font", "defs", "svg"] {
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(serialize_err)?;
    }

    let body = String::from_utf8(writer.into_inner()).map_err(serialize_err)?;
    let mut out = String::with_capacity(SVG_PREAMBLE.len() + body.len() + 1);
    out.push_str(SVG_PREAMBLE);
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}

/// Render `document` and write it to `path`
pub fn write_subset(document: &FontDocument, path: &Path) -> Result<()> {
    let svg = render_subset(document)?;
    std::fs::write(path, svg).map_err(|source| SubsetError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} glyphs to {}", document.glyph_count(), path.display());
    Ok(())
}
