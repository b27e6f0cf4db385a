// vim: set ai et ts=4 sw=4 sts=4:
//! Reading puzzle descriptions from files.
pub mod yaml;
pub mod text;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::puzzle::Puzzle;
use super::error::{Error, Result};

/// Run lengths of every row (top to bottom) and every column (left to
/// right), as declared by a puzzle description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clues {
    pub rows: Vec<Vec<usize>>,
    pub cols: Vec<Vec<usize>>,
}

impl Clues {
    pub fn into_puzzle(self) -> Result<Puzzle> {
        Puzzle::new(&self.rows, &self.cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Text,
}

impl Format {
    /// `.yml` and `.yaml` files are YAML documents, anything else is taken
    /// to be in the text layout.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Format::Yaml,
            _ => Format::Text,
        }
    }

    pub fn parse(&self, input: &str) -> Result<Clues> {
        match self {
            Format::Yaml => yaml::parse(input),
            Format::Text => text::parse(input),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yaml" => Ok(Format::Yaml),
            "text" => Ok(Format::Text),
            other  => Err(Error::Format(format!("unknown format {:?}", other))),
        }
    }
}

/// Reads and parses a puzzle file. Without an explicit format, the file
/// extension decides.
pub fn load(path: &Path, format: Option<Format>) -> Result<Clues> {
    let input = fs::read_to_string(path)?;
    format.unwrap_or_else(|| Format::from_path(path))
          .parse(&input)
}
