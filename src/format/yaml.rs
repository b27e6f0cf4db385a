// vim: set ai et ts=4 sw=4 sts=4:
use std::convert::TryFrom;
use yaml_rust::{YamlLoader, Yaml};

use super::Clues;
use super::super::error::{Error, Result};

/// Parses a document with `rows` and `cols` lists. Each entry is a single
/// number, a string of whitespace-separated numbers, or empty:
///
/// ```yaml
/// rows:
///     - 3
///     - 1 1
///     -
/// cols:
///     - 2
///     - 1
///     - 2
/// ```
pub fn parse(input: &str) -> Result<Clues>
{
    let docs: Vec<Yaml> = YamlLoader::load_from_str(input)
        .map_err(|e| Error::Format(e.to_string()))?;
    let doc = docs.first()
        .ok_or_else(|| Error::Format("empty YAML document".to_string()))?;

    Ok(Clues {
        rows: parse_strips(&doc["rows"], "rows")?,
        cols: parse_strips(&doc["cols"], "cols")?,
    })
}

fn parse_strips(input: &Yaml, key: &str) -> Result<Vec<Vec<usize>>> {
    let list = input.as_vec()
        .ok_or_else(|| Error::Format(format!("`{}` must be a list", key)))?;
    list.iter()
        .map(|yaml_val| parse_runs(yaml_val))
        .collect()
}

fn parse_runs(input: &Yaml) -> Result<Vec<usize>> {
    match input {
        Yaml::String(s)  => s.split_whitespace()
                             .map(|int| int.parse().map_err(|_| Error::Format(format!("bad run length {:?}", int))))
                             .collect(),
        Yaml::Integer(i) => usize::try_from(*i)
                             .map(|len| vec![len])
                             .map_err(|_| Error::Format(format!("bad run length {}", i))),
        Yaml::Null       => Ok(vec![]),
        _ => Err(Error::Format(format!("unexpected run lengths: {:?}", input))),
    }
}
