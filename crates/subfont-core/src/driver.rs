//! External font compiler driver
//!
//! Binary fonts are produced by an external subsetter (fontTools'
//! `pyftsubset` by default) run once per flavor. The compiler reads the
//! original binary font and picks glyphs from the `--unicodes` list itself.
//!
//! The exit status is not consulted. Success means the compiler wrote
//! nothing to stderr; otherwise the last non-empty stderr line is reported
//! as the failure.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{Flavor, SubsetConfig, DEFAULT_COMPILER};
use crate::error::{Result, SubsetError};
use crate::select::{join_selectors, SelectorToken};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Keeps only the most recent non-empty line written to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastLine {
    line: Option<String>,
}

impl LastLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.trim().is_empty() {
            self.line = Some(line.to_string());
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.line.as_deref()
    }

    pub fn into_inner(self) -> Option<String> {
        self.line
    }

    /// Drain `reader` line by line until it closes
    pub fn drain<R: Read>(mut self, reader: R) -> Self {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => self.push(&String::from_utf8_lossy(&buf)),
                Err(err) => {
                    log::debug!("Stopped reading compiler stderr: {}", err);
                    break;
                },
            }
        }
        self
    }
}

/// What one compiler invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// No diagnostics; the font was written to `output`
    Succeeded { output: PathBuf },
    /// The compiler complained; `diagnostic` is its last stderr line
    Failed { output: PathBuf, diagnostic: String },
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn output(&self) -> &Path {
        match self {
            Self::Succeeded { output } | Self::Failed { output, .. } => output,
        }
    }
}

/// One binary font to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    /// The original, unfiltered font
    pub source: &'a Path,
    pub selectors: &'a [SelectorToken],
    pub flavor: Flavor,
    pub output: PathBuf,
}

impl CompileRequest<'_> {
    /// Arguments passed after the program name
    pub fn args(&self) -> Vec<OsString> {
        let mut output_arg = OsString::from("--output-file=");
        output_arg.push(&self.output);
        vec![
            self.source.as_os_str().to_owned(),
            OsString::from(format!("--unicodes={}", join_selectors(self.selectors))),
            OsString::from(format!("--flavor={}", self.flavor)),
            output_arg,
            OsString::from("--no-ignore-missing-unicodes"),
        ]
    }
}

/// Runs the external subsetter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCompiler {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for FontCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl FontCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &SubsetConfig) -> Self {
        Self::new(&config.compiler).with_timeout(config.timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Run the compiler for one flavor and wait for it to finish
    ///
    /// Only a compiler that cannot be started or waited on is an error.
    pub fn compile(&self, request: &CompileRequest<'_>) -> Result<CompileOutcome> {
        log::debug!(
            "Running {} {:?}",
            self.program.display(),
            request.args()
        );

        let mut child = Command::new(&self.program)
            .args(request.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SubsetError::Spawn {
                program: self.program_name(),
                source,
            })?;

        let reader = child
            .stderr
            .take()
            .map(|stderr| thread::spawn(move || LastLine::new().drain(stderr)));

        // A killed compiler may leave descendants holding stderr open, so the
        // reader is only joined after a normal exit.
        let diagnostic = match self.wait(&mut child)? {
            Some(limit) => {
                drop(reader);
                Some(format!(
                    "{} did not finish within {}s and was killed",
                    self.program_name(),
                    limit.as_secs()
                ))
            },
            None => match reader.map(thread::JoinHandle::join) {
                Some(Ok(sink)) => sink.into_inner(),
                Some(Err(_)) => Some("stderr reader thread panicked".to_string()),
                None => None,
            },
        };

        let output = request.output.clone();
        Ok(match diagnostic {
            Some(diagnostic) => {
                log::warn!("{} failed for {}: {}", self.program_name(), request.flavor, diagnostic);
                CompileOutcome::Failed { output, diagnostic }
            },
            None => CompileOutcome::Succeeded { output },
        })
    }

    /// Wait for exit; returns the limit if the child had to be killed
    fn wait(&self, child: &mut Child) -> Result<Option<Duration>> {
        let wait_err = |source| SubsetError::Wait {
            program: self.program_name(),
            source,
        };

        let Some(limit) = self.timeout else {
            let status = child.wait().map_err(wait_err)?;
            log::debug!("{} exited with {}", self.program_name(), status);
            return Ok(None);
        };

        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait().map_err(wait_err)? {
                log::debug!("{} exited with {}", self.program_name(), status);
                return Ok(None);
            }
            if Instant::now() >= deadline {
                if let Err(err) = child.kill() {
                    log::debug!("Killing {} failed: {}", self.program_name(), err);
                }
                child.wait().map_err(wait_err)?;
                return Ok(Some(limit));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}
