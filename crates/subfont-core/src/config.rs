//! Run configuration
//!
//! Defaults match the classic setup: write to `subset/`, produce WOFF and
//! WOFF2 through `pyftsubset`, and wait for the compiler as long as it
//! takes. Two environment variables can override the compiler side:
//!
//! ```bash
//! SUBFONT_COMPILER=/opt/fonttools/bin/pyftsubset SUBFONT_TIMEOUT=120 subfont icons.txt font.svg font.ttf
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SubsetError;
use crate::naming::DEFAULT_OUTPUT_DIR;

/// Program invoked when nothing else is configured
pub const DEFAULT_COMPILER: &str = "pyftsubset";

/// Overrides the compiler program
pub const COMPILER_ENV: &str = "SUBFONT_COMPILER";

/// Compiler timeout in whole seconds
pub const TIMEOUT_ENV: &str = "SUBFONT_TIMEOUT";

/// Binary font container produced by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Woff,
    Woff2,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Flavor::Woff, Flavor::Woff2];

    /// Value for `--flavor=`, also used as the file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = SubsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "woff" => Ok(Self::Woff),
            "woff2" => Ok(Self::Woff2),
            other => Err(SubsetError::Config(format!(
                "unknown flavor `{other}` (expected woff or woff2)"
            ))),
        }
    }
}

/// How a subsetting run writes its outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetConfig {
    /// Where the subset files go
    pub output_dir: PathBuf,
    /// Binary flavors to compile, in order
    pub flavors: Vec<Flavor>,
    /// External compiler program
    pub compiler: PathBuf,
    /// Give up on the compiler after this long (None waits forever)
    pub timeout: Option<Duration>,
    /// Drop repeated selector tokens before invoking the compiler
    pub dedupe_selectors: bool,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            flavors: Flavor::ALL.to_vec(),
            compiler: PathBuf::from(DEFAULT_COMPILER),
            timeout: None,
            dedupe_selectors: false,
        }
    }
}

impl SubsetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus `SUBFONT_COMPILER` / `SUBFONT_TIMEOUT`
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source; bad values are ignored
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(compiler) = lookup(COMPILER_ENV).filter(|v| !v.trim().is_empty()) {
            log::info!("Font compiler set to `{}` via {}", compiler, COMPILER_ENV);
            self.compiler = PathBuf::from(compiler);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout = Some(Duration::from_secs(secs)),
                Ok(_) => self.timeout = None,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number of seconds", TIMEOUT_ENV, raw),
            }
        }
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_flavors(mut self, flavors: Vec<Flavor>) -> Self {
        self.flavors = flavors;
        self
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dedupe_selectors(mut self, dedupe: bool) -> Self {
        self.dedupe_selectors = dedupe;
        self
    }
}
