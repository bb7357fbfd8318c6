//! Full run: write the subset SVG and compile the binary flavors

use std::path::Path;

use anyhow::{Context, Result};
use subfont_core::{run as run_subset, CompileOutcome, FontDocument, IconList, SubsetConfig};

pub fn run(
    icons: &IconList,
    document: &FontDocument,
    font: &Path,
    config: &SubsetConfig,
) -> Result<()> {
    let report = run_subset(icons, document, font, config)
        .with_context(|| format!("Subsetting {} failed", font.display()))?;

    println!("Icons in output file: {}", report.retained);
    println!("Generated SVG font file: {}", report.svg_path.display());

    for (_, outcome) in &report.binaries {
        match outcome {
            CompileOutcome::Succeeded { output } => {
                println!("Created font file {}", output.display());
            },
            CompileOutcome::Failed { diagnostic, .. } => {
                println!();
                println!("An error was found:");
                println!("{}", diagnostic);
            },
        }
    }

    Ok(())
}
