//! Icon list reading
//!
//! An icon list is plain text. Each line holds one or more icon names
//! separated by commas, so both `home,star` and one-name-per-line files work.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SubsetError};

/// Requested icon names in the order they were read
///
/// Duplicates are kept; matching only cares about membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconList {
    names: Vec<String>,
}

impl IconList {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Number of tokens read, duplicates included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names with repeats removed, first occurrence wins
    pub fn unique(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter().filter(|name| seen.insert(*name)).collect()
    }

    pub fn as_set(&self) -> HashSet<&str> {
        self.iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for IconList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Parse icon names from any buffered reader
///
/// Bytes that are not UTF-8 are replaced rather than rejected.
pub fn parse_icon_list<R: BufRead>(mut reader: R) -> std::io::Result<IconList> {
    let mut names = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            log::warn!("Icon list line is not valid UTF-8: {}", line.trim_end());
        }
        names.extend(
            line.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
        );
    }
    Ok(IconList::new(names))
}

/// Read the icon list file at `path`
///
/// An unreadable file is fatal; there is no meaningful partial result.
pub fn read_icon_list(path: &Path) -> Result<IconList> {
    let to_err = |source| SubsetError::IconList {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_err)?;
    let icons = parse_icon_list(BufReader::new(file)).map_err(to_err)?;
    log::info!("Icons in input file: {}", icons.len());
    Ok(icons)
}
