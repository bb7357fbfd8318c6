//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use subfont_core::Flavor;

/// Subset Font Creator - keep only the icons you use
#[derive(Parser, Debug)]
#[command(name = "subfont")]
#[command(version, about, long_about = None, disable_help_flag = true)]
#[command(override_usage = "subfont [OPTIONS] <ICONSLIST> <SVGFONT> <FONT>")]
pub struct Cli {
    /// List of glyph names separated by comma or line breaks
    pub iconslist: Option<PathBuf>,

    /// Source SVG font file
    pub svgfont: Option<PathBuf>,

    /// Source OpenType or TTF font file
    pub font: Option<PathBuf>,

    /// Does not generate any file; reports found and missing icons
    #[arg(short = 'd', long = "dryrun")]
    pub dryrun: bool,

    /// Output directory for the subset files
    #[arg(short = 'o', long = "output-dir", default_value = subfont_core::naming::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Binary flavor to produce (repeatable): woff, woff2
    #[arg(long = "flavor", action = ArgAction::Append, value_parser = parse_flavor)]
    pub flavor: Vec<Flavor>,

    /// Font compiler program (default: pyftsubset, or $SUBFONT_COMPILER)
    #[arg(long = "compiler")]
    pub compiler: Option<PathBuf>,

    /// Kill the font compiler after this many seconds
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Drop repeated code points before calling the compiler
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print help
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,
}

/// The three input paths, once all are present
#[derive(Debug, Clone)]
pub struct Inputs {
    pub iconslist: PathBuf,
    pub svgfont: PathBuf,
    pub font: PathBuf,
}

impl Cli {
    /// None when help was asked for or an input is missing
    pub fn inputs(&self) -> Option<Inputs> {
        if self.help {
            return None;
        }
        Some(Inputs {
            iconslist: self.iconslist.clone()?,
            svgfont: self.svgfont.clone()?,
            font: self.font.clone()?,
        })
    }
}

fn parse_flavor(s: &str) -> Result<Flavor, String> {
    s.parse().map_err(|e: subfont_core::SubsetError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_dryrun() {
        let cli = Cli::try_parse_from(["subfont", "-d", "icons.txt", "font.svg", "font.ttf"]).unwrap();
        assert!(cli.dryrun);
        let inputs = cli.inputs().unwrap();
        assert_eq!(inputs.iconslist, PathBuf::from("icons.txt"));
        assert_eq!(inputs.svgfont, PathBuf::from("font.svg"));
        assert_eq!(inputs.font, PathBuf::from("font.ttf"));
        assert_eq!(cli.output_dir, PathBuf::from("subset"));
    }

    #[test]
    fn test_long_dryrun() {
        let cli = Cli::try_parse_from(["subfont", "--dryrun", "a", "b", "c"]).unwrap();
        assert!(cli.dryrun);
    }

    #[test]
    fn test_no_arguments_has_no_inputs() {
        let cli = Cli::try_parse_from(["subfont"]).unwrap();
        assert!(cli.inputs().is_none());
    }

    #[test]
    fn test_help_wins_over_inputs() {
        let cli = Cli::try_parse_from(["subfont", "--help", "a", "b", "c"]).unwrap();
        assert!(cli.inputs().is_none());
    }

    #[test]
    fn test_flavors_and_options() {
        let cli = Cli::try_parse_from([
            "subfont", "--flavor", "woff2", "--flavor", "WOFF", "--timeout", "60", "--dedupe",
            "-o", "out", "a", "b", "c",
        ])
        .unwrap();
        assert_eq!(cli.flavor, [Flavor::Woff2, Flavor::Woff]);
        assert_eq!(cli.timeout, Some(60));
        assert!(cli.dedupe);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_flavor_is_rejected() {
        assert!(Cli::try_parse_from(["subfont", "--flavor", "ttf", "a", "b", "c"]).is_err());
    }
}
