// vim: set ai et ts=4 sw=4 sts=4:
mod rules;
mod speculate;
mod search;
mod solver;

pub use self::solver::{Solver, Outcome, Stats};

use std::fmt;
use ansi_term::ANSIString;
use log::{debug, trace};

use super::grid::{Grid, Line, SquareStatus};
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction, Direction::*};
use super::row::Row;
use super::progress::{Rule, Step};
use super::error::{Error, Result};

/// The board: the grid of squares, the runs of every row and column, and the
/// log of steps that led to the current markings. Cloning a puzzle gives an
/// independent board to speculate on.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub rows: Vec<Row>,
    pub cols: Vec<Row>,
    pub grid: Grid,
    undone: usize,
    steps: Vec<Step>,
    speculative: bool,
}

impl Puzzle {
    /// Builds the rows and columns and performs the initial justification
    /// pass. Fails with `Error::Inconsistent` when the row and column totals
    /// disagree, and with `Error::Contradiction` when the runs cannot be
    /// placed at all.
    pub fn new(row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Result<Self>
    {
        if row_run_lengths.is_empty() || col_run_lengths.is_empty() {
            return Err(Error::Format("puzzle needs at least one row and one column".to_string()));
        }
        let row_total = Self::total(row_run_lengths, Horizontal)?;
        let col_total = Self::total(col_run_lengths, Vertical)?;
        if row_total != col_total {
            return Err(Error::Inconsistent { rows: row_total, cols: col_total });
        }

        let width = col_run_lengths.len();
        let height = row_run_lengths.len();
        let rows = (0..height).map(|y| Row::new(Horizontal, y, width, &row_run_lengths[y]))
                              .collect::<Vec<_>>();
        let cols = (0..width).map(|x| Row::new(Vertical, x, height, &col_run_lengths[x]))
                             .collect::<Vec<_>>();

        let mut puzzle = Puzzle {
            rows: rows,
            cols: cols,
            grid: Grid::new(width, height),
            undone: width + height,
            steps: vec![],
            speculative: false,
        };
        puzzle.record(Step::new(Rule::Read));
        puzzle.initialize()?;
        Ok(puzzle)
    }

    // Sum of all run lengths. A row or column with a zero-length run must
    // have no other runs.
    fn total(run_lengths: &[Vec<usize>], direction: Direction) -> Result<usize> {
        run_lengths.iter().enumerate().try_fold(0usize, |total, (index, runs)| {
            if runs.len() > 1 && runs.contains(&0) {
                return Err(Error::Format(format!("{} {} mixes zero-length runs with others",
                                                 direction.strip_name(), index + 1)));
            }
            runs.iter().try_fold(total, |total, &length| total.checked_add(length))
                .ok_or_else(|| Error::Format(format!("run lengths of {} {} are too large",
                                                     direction.strip_name(), index + 1)))
        })
    }

    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }

    /// Number of rows and columns that still have runs of unknown placement.
    pub fn undone(&self) -> usize { self.undone }
    pub fn is_solved(&self) -> bool { self.undone == 0 }

    pub fn steps(&self) -> &[Step] { &self.steps }
    pub fn last_step(&self) -> Option<&Step> { self.steps.last() }

    pub fn strips(&self, direction: Direction) -> &[Row] {
        match direction {
            Horizontal => &self.rows,
            Vertical   => &self.cols,
        }
    }
    fn strip(&self, direction: Direction, index: usize) -> &Row {
        &self.strips(direction)[index]
    }

    pub fn square(&self, x: usize, y: usize) -> SquareStatus {
        self.grid.get_square(x, y).get_status()
    }
    /// Marks a single square; returns whether it was unknown before.
    pub fn set_square(&mut self, x: usize, y: usize, status: SquareStatus) -> Result<bool> {
        self.mark_square(Horizontal, y, x, status)
    }

    /// Rows of the board as text, `#` for filled in, `.` for crossed out and
    /// a space for unknown squares.
    pub fn picture(&self) -> Vec<String> {
        (0..self.height()).map(|y| self.grid.line(Horizontal, y).to_string())
                          .collect()
    }

    // status with the virtual crossed out border around the grid
    fn status(&self, direction: Direction, index: isize, at: isize) -> SquareStatus {
        self.grid.status(direction, index, at)
    }

    fn mark_square(&mut self, direction: Direction, index: usize, at: usize, status: SquareStatus)
        -> Result<bool>
    {
        Ok(self.grid.set_status(direction, index, at, status)?.is_some())
    }

    /// Runs `f` on a copy of the squares of one row or column and writes the
    /// squares it marked back into the grid. Returns whether anything changed.
    fn apply_to_strip<F>(&mut self, direction: Direction, index: usize, f: F) -> Result<bool>
        where F: FnOnce(&mut Row, &mut Line) -> Result<()>
    {
        let before = self.grid.line(direction, index);
        let mut line = before.clone();

        let row = match direction {
            Horizontal => &mut self.rows[index],
            Vertical   => &mut self.cols[index],
        };
        let was_completed = row.is_completed();
        f(row, &mut line)?;
        if !was_completed && row.is_completed() {
            self.undone -= 1;
        }

        let mut changed = false;
        for (at, status) in line.changes_from(&before) {
            self.grid.set_status(direction, index, at, status)?;
            changed = true;
        }
        Ok(changed)
    }

    /// Appends a step to the log if it touched anything.
    fn record(&mut self, step: Step) -> bool {
        if step.is_empty() && step.rule != Rule::Read {
            return false;
        }
        match self.speculative {
            true  => trace!("  (trial) {}", step),
            false => debug!("{}", step),
        }
        self.steps.push(step);
        true
    }

    /// A copy for a throwaway hypothesis; the step log is left behind.
    fn trial_copy(&self) -> Puzzle {
        Puzzle {
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            grid: self.grid.clone(),
            undone: self.undone,
            steps: vec![],
            speculative: true,
        }
    }
}

impl Puzzle {
    /// Renders the board with its clues. If subdivision is given, visual
    /// subdivisor lines are drawn across the grid every Nth row/col.
    pub fn render(&self, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| row.runs.iter()
                                        .map(|run| run.to_colored_string())
                                        .collect::<Vec<_>>())
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                  -1) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.runs.len())
                                    .max().unwrap_or(0);

        let mut result = String::new();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &self.grid.squares[y].iter()
                                     .map(|s| format!(" {:1} ", s))
                                     .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        result
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let part = match line_idx < col.runs.len() {
                true => {
                    let colored = col.runs[col.runs.len()-1-line_idx].to_colored_string();
                    format!(" {}", lalign_colored(&colored, 2, emit_color))
                },
                false => format!(" {:-2}", " "),
            };
            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(Some(5), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_must_agree() {
        match Puzzle::new(&[vec![1], vec![1]], &[vec![2], vec![1]]) {
            Err(Error::Inconsistent { rows: 2, cols: 3 }) => {},
            other => panic!("unexpected result: {:?}", other.map(|p| p.picture())),
        }
    }

    #[test]
    fn run_lengths_that_overflow() {
        let huge = usize::MAX / 2;
        match Puzzle::new(&[vec![huge, huge, huge]], &[vec![1]]) {
            Err(Error::Format(msg)) => assert_eq!(msg, "run lengths of row 1 are too large"),
            other => panic!("unexpected result: {:?}", other.map(|p| p.picture())),
        }
    }

    #[test]
    fn zero_runs_stand_alone() {
        match Puzzle::new(&[vec![1]], &[vec![1, 0]]) {
            Err(Error::Format(msg)) => assert_eq!(msg, "column 1 mixes zero-length runs with others"),
            other => panic!("unexpected result: {:?}", other.map(|p| p.picture())),
        }
    }

    #[test]
    fn infeasible_at_initialization() {
        let err = Puzzle::new(&[vec![2], vec![]], &[vec![2], vec![]]).unwrap_err();
        assert!(err.is_contradiction());
    }

    #[test]
    fn zero_run_row_is_crossed_out_immediately() {
        let puzzle = Puzzle::new(&[vec![0], vec![3], vec![1]],
                                 &[vec![2], vec![1], vec![1]]).unwrap();
        assert_eq!(puzzle.picture()[0], "...");
        assert_eq!(puzzle.picture()[1], "###");
        assert!(puzzle.rows[0].is_completed());
    }

    #[test]
    fn initialization_is_logged() {
        let puzzle = Puzzle::new(&[vec![2], vec![1]], &[vec![2], vec![1]]).unwrap();
        assert_eq!(puzzle.steps()[0].to_string(), "read problem");
        assert_eq!(puzzle.steps()[1].to_string(),
                   "mark first surely full squares and empties in row 1 and column 1");
    }

    #[test]
    fn render_plain() {
        let mut puzzle = Puzzle::new(&[vec![1], vec![]], &[vec![1], vec![]]).unwrap();
        puzzle.set_square(0, 0, SquareStatus::FilledIn).unwrap();
        let text = puzzle.render(None, false);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "    1  0  ");
        assert_eq!(lines[1], "  \u{2554}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2557}");
        assert_eq!(lines[2], "1 \u{2551} \u{25A0}  . \u{2551}");
        assert_eq!(lines[3], "0 \u{2551}      \u{2551}");
    }
}
