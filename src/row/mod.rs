// vim: set ai et ts=4 sw=4 sts=4:
mod justify;
mod solver;

use std::fmt;
use ansi_term::{Colour, Style, ANSIString};

use super::util::Direction;

/// A row or column of the puzzle, identified by its direction and index.
#[derive(Debug, Clone)]
pub struct Row {
    pub direction:  Direction,
    pub index:      usize,
    pub length:     usize,
    pub runs:       Vec<Run>,
    undone:         usize,
}

impl Row {
    pub fn new(direction: Direction,
               row_index: usize,
               row_length: usize,
               run_lengths: &[usize]) -> Self
    {
        let runs = match run_lengths.is_empty() {
            true  => vec![Run::new(0, 0, row_length)],
            false => run_lengths.iter()
                                .enumerate()
                                .map(|(i, &len)| Run::new(i, len, row_length))
                                .collect::<Vec<_>>(),
        };
        let undone = runs.len();
        Row {
            direction: direction,
            index:     row_index,
            length:    row_length,
            runs:      runs,
            undone:    undone,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.undone == 0
    }
    /// Number of runs whose placement is not yet known exactly.
    pub fn undone(&self) -> usize {
        self.undone
    }
    pub fn is_trivially_empty(&self) -> bool {
        self.runs.iter().all(|r| r.length == 0)
    }

    pub fn first_undone_run(&self) -> Option<&Run> {
        self.runs.iter().find(|r| !r.is_completed())
    }
    pub fn last_undone_run(&self) -> Option<&Run> {
        self.runs.iter().rev().find(|r| !r.is_completed())
    }

    /// Shortest run whose bounds contain the square at `position`, if any.
    pub fn min_length_covering(&self, position: usize) -> Option<usize> {
        self.runs.iter()
                 .filter(|run| run.start <= position && position <= run.end)
                 .map(|run| run.length)
                 .min()
    }

    fn complete_run(&mut self, run_index: usize) {
        let run = &mut self.runs[run_index];
        if !run.completed {
            run.completed = true;
            self.undone -= 1;
        }
    }

    fn name(&self) -> String {
        format!("{} {}", self.direction.strip_name(), self.index + 1)
    }
}

// -------------------------------------------------------------

/// One declared run together with the bounds its block must lie in. The
/// bounds only ever shrink; once they are exactly as long as the run, the
/// run is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub index: usize,
    pub length: usize,
    pub start: usize,
    pub end: usize,
    completed: bool,
}

impl Run {
    pub fn new(index: usize, length: usize, row_length: usize) -> Self
    {
        Run {
            index,
            length,
            start: 0,
            end: row_length.saturating_sub(1),
            completed: false,
        }
    }
    pub fn is_completed(&self) -> bool {
        self.completed
    }
    /// Number of squares in the bounds beyond the run's own length.
    pub fn span(&self) -> usize {
        self.end - self.start
    }
    /// Squares covered by the block whatever its final position is.
    pub fn overlap(&self) -> std::ops::Range<usize> {
        (self.end + 1).saturating_sub(self.length)..(self.start + self.length)
    }
    pub fn to_colored_string(&self) -> ANSIString {
        let style = match self.completed {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        style.paint(self.to_string())
    }
}
impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::util::Direction::*;

    #[test]
    fn empty_run_list_becomes_single_zero_run() {
        let row = Row::new(Horizontal, 0, 4, &[]);
        assert_eq!(row.runs.len(), 1);
        assert!(row.is_trivially_empty());
    }

    #[test]
    fn undone_runs_from_either_end() {
        let mut row = Row::new(Vertical, 2, 10, &[3, 1, 2]);
        row.complete_run(0);
        assert_eq!(row.undone(), 2);
        assert_eq!(row.first_undone_run().map(|r| r.length), Some(1));
        assert_eq!(row.last_undone_run().map(|r| r.length), Some(2));
        row.complete_run(0);
        assert_eq!(row.undone(), 2);
        assert_eq!(row.name(), "column 3");
    }

    #[test]
    fn overlap_of_bounds() {
        let mut run = Run::new(0, 4, 10);
        run.start = 2;
        run.end = 7;
        assert_eq!(run.overlap(), 4..6);
        assert_eq!(run.span(), 5);
        run.end = 9;
        assert!(run.overlap().is_empty());
    }
}
