// vim: set ai et ts=4 sw=4 sts=4:
//! A nonogram solver: line-by-line deduction over the run bounds of every
//! row and column, lookahead into neighbouring rows, contradiction testing,
//! and guessing when all of that gets stuck.
pub mod util;
pub mod error;
pub mod grid;
pub mod row;
pub mod progress;
pub mod puzzle;
pub mod format;

pub use self::error::{Error, Result};
pub use self::grid::SquareStatus;
pub use self::progress::{Rule, Step};
pub use self::puzzle::{Puzzle, Solver, Outcome, Stats};
pub use self::format::{Clues, Format};
