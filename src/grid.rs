// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::ops::Range;
use super::util::{Direction, Direction::*};
use super::error::{Error, Result};

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    FilledIn,
    CrossedOut,
    Unknown,
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::FilledIn   => "FilledIn",
            SquareStatus::CrossedOut => "CrossedOut",
            SquareStatus::Unknown    => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub struct StatusChange {
    pub row: usize,
    pub col: usize,
    pub old: SquareStatus,
    pub new: SquareStatus,
}
impl StatusChange {
    pub fn new(row: usize, col: usize, old: SquareStatus, new: SquareStatus) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for StatusChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}

#[derive(PartialEq, Debug)]
pub enum StatusError {
    ChangeRejected(StatusChange, String),  // new status conflicts with existing (non-unknown) status
}
impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "StatusError: {}", match self {
            StatusError::ChangeRejected(change, msg) =>
                format!("In {}, attempt to change status from {} to {} was rejected: {}",
                    change.fmt_location(), change.old, change.new, msg),
        })
    }
}

pub type StatusResult = std::result::Result<Option<StatusChange>, StatusError>; // if it worked: the change, if any; if it didn't, the change that was rejected

// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct Square {
    row: usize,
    col: usize,
    status: SquareStatus,
}
impl Square {
    pub fn new(x: usize, y: usize) -> Square {
        Square {
            row: y,
            col: x,
            status: SquareStatus::Unknown,
        }
    }

    pub fn get_status(&self) -> SquareStatus { self.status }

    pub fn set_status(&mut self, new_status: SquareStatus) -> StatusResult {
        let cand_change = StatusChange::new(self.row, self.col, self.status, new_status);
        self.apply_status_change(cand_change)
    }
    pub fn apply_status_change(&mut self, cand_change: StatusChange)
        -> StatusResult
    {
        assert!(cand_change.row == self.row);
        assert!(cand_change.col == self.col);

        // once known, a square's status is final; anything else is a conflict
        if self.status != SquareStatus::Unknown && self.status != cand_change.new {
            return Err(StatusError::ChangeRejected(cand_change, "conflicting information".to_string()));
        }
        if self.status != cand_change.new {
            self.status = cand_change.new;
            return Ok(Some(cand_change));
        }
        Ok(None)
    }

    pub fn fmt_visual(&self) -> &str {
        match self.status {
            SquareStatus::CrossedOut => " ",
            SquareStatus::FilledIn   => "\u{25A0}",
            SquareStatus::Unknown    => ".",
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}
impl HasGridLocation for Square {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}

// ------------------------------------------------

#[derive(Clone)]
pub struct Grid {
    pub squares: Vec<Vec<Square>>,
    width: usize,
    height: usize,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            squares: (0..height).map(|y| (0..width).map(|x| Square::new(x, y))
                                                   .collect::<Vec<_>>())
                                .collect(),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn get_square(&self, x: usize, y: usize) -> &Square {
        &self.squares[y][x]
    }
    pub fn get_square_mut(&mut self, x: usize, y: usize) -> &mut Square {
        &mut self.squares[y][x]
    }

    /// Length of a row (`Horizontal`) or column (`Vertical`).
    pub fn strip_length(&self, direction: Direction) -> usize {
        match direction {
            Horizontal => self.width,
            Vertical   => self.height,
        }
    }
    pub fn square_index(direction: Direction, row_index: usize, at: usize) -> (usize, usize) {
        match direction {
            Horizontal => (at, row_index),
            Vertical   => (row_index, at),
        }
    }

    /// Status of square `at` within strip `row_index`; everything outside the
    /// grid reads as crossed out.
    pub fn status(&self, direction: Direction, row_index: isize, at: isize) -> SquareStatus {
        let (x, y) = match direction {
            Horizontal => (at, row_index),
            Vertical   => (row_index, at),
        };
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return SquareStatus::CrossedOut;
        }
        self.squares[y as usize][x as usize].get_status()
    }
    pub fn set_status(&mut self, direction: Direction, row_index: usize, at: usize, status: SquareStatus)
        -> StatusResult
    {
        let (x, y) = Self::square_index(direction, row_index, at);
        self.get_square_mut(x, y).set_status(status)
    }

    pub fn line(&self, direction: Direction, row_index: usize) -> Line {
        let squares = (0..self.strip_length(direction))
            .map(|at| {
                let (x, y) = Self::square_index(direction, row_index, at);
                self.squares[y][x].get_status()
            })
            .collect();
        Line { squares }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

// ------------------------------------------------

/// Owned copy of the squares of one row or column. Rules work on lines and
/// the puzzle writes the differences back into the grid; hypotheses are
/// tried on throwaway copies.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    squares: Vec<SquareStatus>,
}
impl Line {
    pub fn new(squares: Vec<SquareStatus>) -> Self {
        Line { squares }
    }
    pub fn unknown(length: usize) -> Self {
        Line { squares: vec![SquareStatus::Unknown; length] }
    }
    pub fn len(&self) -> usize { self.squares.len() }
    pub fn is_empty(&self) -> bool { self.squares.is_empty() }
    pub fn squares(&self) -> &[SquareStatus] { &self.squares }

    /// Reads past either end are crossed out (a virtual empty border).
    pub fn get(&self, at: isize) -> SquareStatus {
        if at < 0 || at as usize >= self.squares.len() {
            return SquareStatus::CrossedOut;
        }
        self.squares[at as usize]
    }
    pub fn is(&self, at: isize, status: SquareStatus) -> bool {
        self.get(at) == status
    }

    /// Overwrites a square unconditionally and returns its previous status.
    pub fn put(&mut self, at: usize, status: SquareStatus) -> SquareStatus {
        std::mem::replace(&mut self.squares[at], status)
    }

    pub fn fill(&mut self, at: isize) -> Result<bool> {
        match self.get(at) {
            SquareStatus::FilledIn   => Ok(false),
            SquareStatus::Unknown    => { self.squares[at as usize] = SquareStatus::FilledIn; Ok(true) }
            SquareStatus::CrossedOut => Err(Error::Contradiction(
                format!("square {} must be filled in but is crossed out", at))),
        }
    }
    pub fn cross_out(&mut self, at: isize) -> Result<bool> {
        match self.get(at) {
            SquareStatus::CrossedOut => Ok(false),
            SquareStatus::Unknown    => { self.squares[at as usize] = SquareStatus::CrossedOut; Ok(true) }
            SquareStatus::FilledIn   => Err(Error::Contradiction(
                format!("square {} must be crossed out but is filled in", at))),
        }
    }

    /// Maximal ranges of squares for which the predicate holds.
    pub fn ranges_of<P>(&self, pred: P) -> Vec<Range<usize>>
        where P: Fn(SquareStatus) -> bool
    {
        let mut result = Vec::<Range<usize>>::new();
        let mut x: usize = 0;
        while x < self.len() {
            // skip past squares for which the predicate does not hold
            while x < self.len() && !pred(self.squares[x]) {
                x += 1;
            }
            if x >= self.len() { break; }

            let range_start = x;
            x += 1; // we already tested the predicate on x at the end of the previous loop
            while x < self.len() && pred(self.squares[x]) {
                x += 1;
            }
            result.push(range_start..x);

            x += 1;
        }
        result
    }

    /// Positions whose status differs from `other`, with the status in `self`.
    pub fn changes_from<'a>(&'a self, other: &'a Line) -> impl Iterator<Item = (usize, SquareStatus)> + 'a {
        self.squares.iter()
                    .zip(other.squares.iter())
                    .enumerate()
                    .filter(|(_, (new, old))| new != old)
                    .map(|(at, (&new, _))| (at, new))
    }
}

impl From<&str> for Line {
    // '#' filled in, '.' crossed out, anything else unknown
    fn from(s: &str) -> Self {
        Line::new(s.chars()
                   .map(|c| match c {
                       '#' => SquareStatus::FilledIn,
                       '.' => SquareStatus::CrossedOut,
                       _   => SquareStatus::Unknown,
                   })
                   .collect())
    }
}
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for s in &self.squares {
            write!(f, "{}", match s {
                SquareStatus::FilledIn   => '#',
                SquareStatus::CrossedOut => '.',
                SquareStatus::Unknown    => ' ',
            })?;
        }
        Ok(())
    }
}
