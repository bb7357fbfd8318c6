//! Subfont CLI: cut an icon font down to the icons a project uses
//!
//! Reads an icon list, filters the SVG font to the matching glyphs, writes
//! `subset/<font>.subset.svg` and has `pyftsubset` build WOFF and WOFF2
//! files with the same code points.

mod cli;
mod commands;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use subfont_core::{read_font_document, read_icon_list, SubsetConfig};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let Some(inputs) = cli.inputs() else {
        // Usage is not a successful run
        Cli::command().print_help().context("Failed to print usage")?;
        println!();
        std::process::exit(1);
    };

    let icons = read_icon_list(&inputs.iconslist)?;
    println!("Icons in input file: {}", icons.len());

    let document = read_font_document(&inputs.svgfont)?;
    println!("Icons in input SVG file: {}", document.glyph_count());

    if cli.dryrun {
        commands::dry_run::run(&icons, &document);
        return Ok(());
    }

    let config = build_config(&cli);
    log::debug!("Run configuration: {:?}", config);
    commands::subset::run(&icons, &document, &inputs.font, &config)
}

/// Defaults, then environment, then flags
fn build_config(cli: &Cli) -> SubsetConfig {
    let mut config = SubsetConfig::from_env()
        .with_output_dir(&cli.output_dir)
        .with_dedupe_selectors(cli.dedupe);
    if !cli.flavor.is_empty() {
        config = config.with_flavors(cli.flavor.clone());
    }
    if let Some(compiler) = &cli.compiler {
        config = config.with_compiler(compiler);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    config
}
