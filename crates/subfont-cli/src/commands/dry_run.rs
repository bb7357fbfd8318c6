//! Dry run: report which icons the font has, write nothing

use subfont_core::{dry_run, join_selectors, FontDocument, IconList, SelectorToken};

pub fn run(icons: &IconList, document: &FontDocument) {
    let report = dry_run(icons, document);
    let selection = &report.selection;

    for icon in &selection.found {
        println!(" + {} ({})", icon.name, describe(&icon.selectors));
    }
    println!("Icons in output file: {}", selection.retained.len());

    if !selection.missing.is_empty() {
        println!();
        println!("Missing icons:");
        for name in &selection.missing {
            println!(" - {}", name);
        }
    }
}

fn describe(selectors: &[SelectorToken]) -> String {
    if selectors.is_empty() {
        "no unicode".to_string()
    } else {
        join_selectors(selectors)
    }
}
