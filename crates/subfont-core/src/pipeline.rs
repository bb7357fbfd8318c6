//! The subsetting run
//!
//! Selection happens once; the subset SVG and every binary flavor are then
//! produced from that same selection. Compiler failures are collected per
//! flavor and never stop the run.

use std::path::{Path, PathBuf};

use crate::config::{Flavor, SubsetConfig};
use crate::driver::{CompileOutcome, CompileRequest, FontCompiler};
use crate::emit::write_subset;
use crate::error::Result;
use crate::icons::IconList;
use crate::model::FontDocument;
use crate::naming::{binary_output_path, ensure_output_dir, svg_output_path};
use crate::select::{select, Selection};

/// Matching results without any side effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunReport {
    pub requested: usize,
    pub available: usize,
    pub selection: Selection,
}

/// What a full run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub svg_path: PathBuf,
    /// Glyph count of the subset SVG
    pub retained: usize,
    /// One outcome per configured flavor, in order
    pub binaries: Vec<(Flavor, CompileOutcome)>,
    pub selection: Selection,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &(Flavor, CompileOutcome)> {
        self.binaries.iter().filter(|(_, outcome)| !outcome.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Match icons against the font and report, writing nothing
pub fn dry_run(icons: &IconList, document: &FontDocument) -> DryRunReport {
    log::debug!("Dry run: matching {} icons", icons.len());
    DryRunReport {
        requested: icons.len(),
        available: document.glyph_count(),
        selection: select(icons, document),
    }
}

/// Select, write the subset SVG, then compile each flavor
pub fn run(
    icons: &IconList,
    document: &FontDocument,
    font_source: &Path,
    config: &SubsetConfig,
) -> Result<RunReport> {
    let selection = select(icons, document);

    ensure_output_dir(&config.output_dir)?;

    let subset = document.with_glyphs(selection.retained.clone());
    let svg_path = svg_output_path(&config.output_dir, font_source);
    write_subset(&subset, &svg_path)?;
    log::info!("Generated SVG font file: {}", svg_path.display());

    let selectors = if config.dedupe_selectors {
        selection.deduped_selectors()
    } else {
        selection.selectors.clone()
    };

    let compiler = FontCompiler::from_config(config);
    let mut binaries = Vec::with_capacity(config.flavors.len());
    for &flavor in &config.flavors {
        let request = CompileRequest {
            source: font_source,
            selectors: &selectors,
            flavor,
            output: binary_output_path(&config.output_dir, font_source, flavor),
        };
        log::debug!("Compiling {} subset", flavor);
        let outcome = compiler.compile(&request)?;
        binaries.push((flavor, outcome));
    }

    Ok(RunReport {
        svg_path,
        retained: subset.glyph_count(),
        binaries,
        selection,
    })
}
