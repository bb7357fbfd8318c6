//! Glyph selection
//!
//! Walks the font's glyphs in document order and keeps the ones whose name
//! was requested. The retained glyphs therefore follow the font file, not
//! the icon list. Each retained glyph also yields the `U+XXXX` selector
//! tokens the external compiler uses to pick the same glyphs from the
//! binary font.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::icons::IconList;
use crate::model::{FontDocument, Glyph};

/// A single code point in `U+XXXX` form
///
/// Hex digits are uppercase and padded to four, so U+E901 stays `U+E901`
/// and U+1F600 is `U+1F600`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorToken(char);

impl SelectorToken {
    pub fn new(ch: char) -> Self {
        Self(ch)
    }

    pub fn char(self) -> char {
        self.0
    }

    pub fn code_point(self) -> u32 {
        self.0 as u32
    }

    /// Tokens for every scalar in a glyph's `unicode` attribute
    pub fn from_unicode_attr(unicode: &str) -> Vec<SelectorToken> {
        unicode.chars().map(SelectorToken).collect()
    }
}

impl fmt::Display for SelectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0 as u32)
    }
}

/// Reasons a `U+XXXX` string is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorParseError {
    #[error("selector must start with `U+`: {0}")]
    MissingPrefix(String),

    #[error("invalid hex digits in selector: {0}")]
    InvalidHex(String),

    #[error("not a Unicode scalar value: {0}")]
    NotAScalar(String),
}

impl FromStr for SelectorToken {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .ok_or_else(|| SelectorParseError::MissingPrefix(s.to_string()))?;
        if hex.is_empty() || hex.len() > 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SelectorParseError::InvalidHex(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| SelectorParseError::InvalidHex(s.to_string()))?;
        char::from_u32(value)
            .map(SelectorToken)
            .ok_or_else(|| SelectorParseError::NotAScalar(s.to_string()))
    }
}

/// A requested icon that exists in the font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundIcon {
    pub name: String,
    pub selectors: Vec<SelectorToken>,
}

/// Outcome of matching an icon list against a font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Matching glyphs, in font order
    pub retained: Vec<Glyph>,
    /// Selector tokens of the retained glyphs, in the same order
    pub selectors: Vec<SelectorToken>,
    /// One entry per retained glyph
    pub found: Vec<FoundIcon>,
    /// Requested names with no glyph, each listed once in request order
    pub missing: Vec<String>,
}

impl Selection {
    /// The comma-joined value for `--unicodes=`
    pub fn unicodes_arg(&self) -> String {
        join_selectors(&self.selectors)
    }

    /// Selector tokens with repeats dropped, first occurrence wins
    pub fn deduped_selectors(&self) -> Vec<SelectorToken> {
        let mut seen = HashSet::new();
        self.selectors
            .iter()
            .copied()
            .filter(|token| seen.insert(*token))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn join_selectors(selectors: &[SelectorToken]) -> String {
    selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Match `icons` against the glyphs of `document`
///
/// Duplicate glyph names are all retained, which also duplicates their
/// selector tokens.
pub fn select(icons: &IconList, document: &FontDocument) -> Selection {
    let requested = icons.as_set();
    let mut selection = Selection::default();

    for glyph in document.glyphs() {
        if !requested.contains(glyph.name.as_str()) {
            continue;
        }

        let tokens = SelectorToken::from_unicode_attr(&glyph.unicode);
        if tokens.is_empty() {
            log::warn!("Glyph `{}` has no unicode value; no selector emitted", glyph.name);
        }
        log::debug!("Retaining glyph `{}` ({})", glyph.name, join_selectors(&tokens));

        selection.selectors.extend_from_slice(&tokens);
        selection.found.push(FoundIcon {
            name: glyph.name.clone(),
            selectors: tokens,
        });
        selection.retained.push(glyph.clone());
    }

    let retained: HashSet<&str> = selection.retained.iter().map(|g| g.name.as_str()).collect();
    selection.missing = icons
        .unique()
        .into_iter()
        .filter(|name| !retained.contains(name))
        .map(str::to_owned)
        .collect();

    log::info!("Icons in output file: {}", selection.retained.len());
    selection
}
