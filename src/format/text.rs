// vim: set ai et ts=4 sw=4 sts=4:
//! The fixed-column text layout. Everything down to the first blank line is
//! ignored. Then come the column clues, stacked top to bottom with two
//! characters per column; a line of dashes, two per column; one line per row
//! with the row clues in three-character fields, a `|`, blanks and a closing
//! `|`; and a second line of dashes identical to the first:
//!
//! ```text
//! A sample problem.
//!
//!             1
//!         1 2 6 9 6 5 5 4 3 4
//!        --------------------
//!      2|                    |
//!   1  1|                    |
//!        --------------------
//! ```
use super::Clues;
use super::super::error::{Error, Result};

fn bad(msg: &str) -> Error {
    Error::Format(msg.to_string())
}

// characters of a fixed-width field, blank past the end of the line
fn field(line: &[char], from: usize, width: usize) -> String {
    (from..from + width).map(|n| line.get(n).copied().unwrap_or(' '))
                        .collect()
}

fn parse_number(field: &str, msg: &str) -> Result<Option<usize>> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| bad(msg))
}

fn is_dashes(line: &[char], number_spaces: usize) -> bool {
    line.get(number_spaces + 1) == Some(&'-')
}

pub fn parse(input: &str) -> Result<Clues>
{
    let lines: Vec<Vec<char>> = input.lines()
                                     .map(|line| line.trim_end_matches('\r').chars().collect())
                                     .collect();

    let blank = lines.iter()
                     .position(|line| line.iter().all(|&c| c == ' '))
                     .ok_or_else(|| bad("file ends before first blank line"))?;
    let body = &lines[blank + 1..];

    let dash_line = body.iter()
                        .position(|line| line.iter().find(|&&c| c != ' ') == Some(&'-'))
                        .ok_or_else(|| bad("file ends before first line of dashes"))?;
    let dashes = &body[dash_line];
    let leading = dashes.iter().take_while(|&&c| c == ' ').count();
    if leading == 0 || (leading - 1) % 3 != 0 {
        return Err(bad("spaces before dashes not divisible by three"));
    }
    let number_spaces = leading - 1;
    let number_dashes = dashes.len() - leading;
    if dashes[leading..].iter().any(|&c| c != '-') {
        return Err(bad("bad line of dashes"));
    }
    if number_dashes % 2 != 0 {
        return Err(bad("dashes not divisible by two"));
    }
    let width = number_dashes / 2;

    let mut cols: Vec<Vec<usize>> = vec![vec![]; width];
    for line in &body[..dash_line] {
        if line.len() > leading + number_dashes {
            return Err(bad("column numbers past the last column"));
        }
        for (col, runs) in cols.iter_mut().enumerate() {
            if let Some(length) = parse_number(&field(line, leading + 2 * col, 2), "bad column number")? {
                runs.push(length);
            }
        }
    }

    let mut rows: Vec<Vec<usize>> = vec![];
    let mut closed = false;
    for line in &body[dash_line + 1..] {
        if is_dashes(line, number_spaces) {
            if line != dashes {
                return Err(bad("bad second row of dashes"));
            }
            closed = true;
            break;
        }
        if line.len() != number_spaces + number_dashes + 2 {
            return Err(bad("bad row length"));
        }
        if line[number_spaces] != '|' || line[number_spaces + number_dashes + 1] != '|' {
            return Err(bad("bad row end marker"));
        }
        if line[number_spaces + 1..=number_spaces + number_dashes].iter().any(|&c| c != ' ') {
            return Err(bad("bad row spaces"));
        }

        let mut runs = vec![];
        for n in (0..number_spaces).step_by(3) {
            if let Some(length) = parse_number(&field(line, n, 3), "bad row number")? {
                runs.push(length);
            }
        }
        rows.push(runs);
    }
    if !closed {
        return Err(bad("file ends before second line of dashes"));
    }

    Ok(Clues { rows, cols })
}
