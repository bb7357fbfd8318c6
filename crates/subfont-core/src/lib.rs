//! Subfont Core: cut icon fonts down to the icons you use
//!
//! Given a list of icon names and an SVG font, subfont keeps only the
//! matching glyphs. It writes the reduced SVG font and asks an external
//! compiler (fontTools' `pyftsubset`) for WOFF and WOFF2 builds that carry
//! the same code points.
//!
//! ```no_run
//! use std::path::Path;
//! use subfont_core::{read_font_document, read_icon_list, run, SubsetConfig};
//!
//! let icons = read_icon_list(Path::new("icons.txt"))?;
//! let font = read_font_document(Path::new("fonts/icons.svg"))?;
//! let report = run(&icons, &font, Path::new("fonts/icons.ttf"), &SubsetConfig::from_env())?;
//! println!("{} glyphs kept", report.retained);
//! # Ok::<(), subfont_core::SubsetError>(())
//! ```

pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod icons;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod select;

pub use config::{Flavor, SubsetConfig};
pub use driver::{CompileOutcome, CompileRequest, FontCompiler, LastLine};
pub use emit::{render_subset, write_subset, SVG_PREAMBLE};
pub use error::{Result, SubsetError};
pub use icons::{parse_icon_list, read_icon_list, IconList};
pub use model::{read_font_document, Definitions, Font, FontDocument, FontFace, Glyph, MissingGlyph};
pub use naming::{binary_output_path, ensure_output_dir, output_path, svg_output_path};
pub use pipeline::{dry_run, run, DryRunReport, RunReport};
pub use select::{join_selectors, select, FoundIcon, SelectorParseError, SelectorToken, Selection};
