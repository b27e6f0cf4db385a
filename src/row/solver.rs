// vim: set ai et ts=4 sts=4 sw=4:
use std::cmp::{min, max};
use log::trace;

use super::Row;
use super::super::grid::{Line, SquareStatus::{CrossedOut, FilledIn, Unknown}};
use super::super::error::{Error, Result};

// Rules local to a single row or column. Each one takes a copy of the row's
// squares, marks whatever it can prove, and leaves it to the caller to write
// the differences back into the grid.
impl Row {
    /// Re-justifies the run bounds against the current squares, then fills in
    /// the squares every run covers no matter where it ends up.
    pub fn mark_runs(&mut self, line: &mut Line) -> Result<()>
    {
        if !self.find_min_starts(line) {
            return Err(Error::Contradiction(format!("no placement of the runs of {} fits", self.name())));
        }
        self.check_bounds()?;
        self.find_max_ends(line)?;

        for run_index in 0..self.runs.len() {
            if self.runs[run_index].is_completed() {
                continue;
            }
            for x in self.runs[run_index].overlap() {
                line.fill(x as isize)?;
            }
            let run = &self.runs[run_index];
            if run.end + 1 - run.start == run.length {
                trace!("{}: run {} completed at {}", self.name(), run_index, run.start);
                self.complete_run(run_index);
            }
        }

        if self.is_completed() {
            self.cross_out_unknowns(line);
        }
        Ok(())
    }

    /// Crosses out squares outside the bounds of every run.
    pub fn mark_outside(&self, line: &mut Line) -> Result<()>
    {
        let mut from = 0;
        for run in &self.runs {
            for x in from..run.start {
                line.cross_out(x as isize)?;
            }
            from = max(from, run.end + 1);
        }
        for x in from..self.length {
            line.cross_out(x as isize)?;
        }
        Ok(())
    }

    /// Crosses out gaps of unknown squares, enclosed by crossed out squares
    /// or the edge, that are too short for any undone run able to reach them.
    pub fn mark_no_room(&self, line: &mut Line) -> Result<()>
    {
        let gaps = line.ranges_of(|s| s == Unknown)
                       .into_iter()
                       .filter(|gap| line.is(gap.start as isize - 1, CrossedOut)
                                  && line.is(gap.end as isize, CrossedOut))
                       .collect::<Vec<_>>();

        for gap in gaps {
            let shortest = self.runs.iter()
                                    .filter(|run| !run.is_completed())
                                    .filter(|run| run.end >= gap.start && run.start < gap.end)
                                    .map(|run| run.length)
                                    .min();
            let fits = match shortest {
                Some(length) => length <= gap.len(),
                None         => false,
            };
            if !fits {
                for x in gap {
                    line.cross_out(x as isize)?;
                }
            }
        }
        Ok(())
    }

    /// Looks at each block of filled squares and the runs whose bounds
    /// contain it. If the longest such run is exactly as long as the block,
    /// the block is closed off on both sides; if even the shortest is longer,
    /// the block is grown away from any nearby crossed out square.
    pub fn mark_blocks(&self, line: &mut Line) -> Result<()>
    {
        let blocks = line.ranges_of(|s| s == FilledIn);

        for block in blocks {
            let (first, last) = (block.start, block.end - 1);
            let mut placed = false;
            let mut longest: Option<usize> = None;
            let mut shortest: Option<usize> = None;

            for run in &self.runs {
                if run.start > first || run.end < last {
                    continue;
                }
                if run.is_completed() {
                    if run.end == last {
                        placed = true;
                        break;
                    }
                    continue;
                }
                longest = Some(longest.map_or(run.length, |l| max(l, run.length)));
                shortest = Some(shortest.map_or(run.length, |l| min(l, run.length)));
            }
            if placed {
                continue;
            }

            let (longest, shortest) = match (longest, shortest) {
                (Some(l), Some(s)) => (l, s),
                _ => return Err(Error::Contradiction(
                        format!("block at {} of {} is not covered by any run", first, self.name()))),
            };

            if longest == block.len() {
                line.cross_out(first as isize - 1)?;
                line.cross_out(last as isize + 1)?;
            } else if shortest > block.len() {
                Self::extend_block(line, last as isize, shortest, block.len())?;
            }
        }
        Ok(())
    }

    // A block of `size` squares ending at `last` belongs to a run of at
    // least `target` squares; a crossed out square close to one end of the
    // block forces it to grow towards the other end.
    fn extend_block(line: &mut Line, last: isize, target: usize, size: usize) -> Result<()>
    {
        let missing = (target - size) as isize;
        let size = size as isize;

        if let Some(n) = (1..=missing).find(|&n| line.is(last + n, CrossedOut)) {
            for k in 0..=(missing - n) {
                line.fill(last - (size + k))?;
            }
        }
        if let Some(n) = (1..=missing).find(|&n| line.is(last + 1 - (size + n), CrossedOut)) {
            for k in 0..=(missing - n) {
                line.fill(last + k + 1)?;
            }
        }
        Ok(())
    }

    /// Tries each unknown square both ways: a square that cannot be filled in
    /// is crossed out and a square that cannot be crossed out is filled in.
    pub fn try_single_squares(&self, line: &mut Line) -> Result<()>
    {
        for x in 0..line.len() {
            if !line.is(x as isize, Unknown) {
                continue;
            }

            let mut test = line.clone();
            test.put(x, FilledIn);
            if !self.clone().find_min_starts(&test) {
                trace!("{}: square {} cannot be filled in", self.name(), x);
                line.cross_out(x as isize)?;
                continue;
            }

            test.put(x, CrossedOut);
            if !self.clone().find_min_starts(&test) {
                trace!("{}: square {} cannot be crossed out", self.name(), x);
                line.fill(x as isize)?;
            }
        }
        Ok(())
    }
}
