// vim: set ai et ts=4 sw=4 sts=4:
use std::cmp::{min, max};
use log::trace;

use super::Puzzle;
use super::super::grid::SquareStatus::{self, CrossedOut, FilledIn, Unknown};
use super::super::progress::{Rule, Step};
use super::super::util::{Direction, Direction::*};
use super::super::error::{Error, Result};

// Rules that assume a block in one row or column and check whether the row
// or column next to it can still be completed.
impl Puzzle {
    /// Looks at the outermost undone row or column on each of the four
    /// sides. A square that cannot be covered by any placement of the
    /// shortest run reaching it, without making the neighbouring row or
    /// column infeasible, is crossed out.
    pub fn try_edges(&mut self) -> Result<bool>
    {
        let mut step = Step::new(Rule::Edges);
        let (width, height) = (self.width(), self.height());

        let top = (0..height.saturating_sub(1))
            .find(|&y| !self.rows[y].is_completed() && (y == 0 || self.rows[y-1].is_completed()));
        if let Some(y) = top {
            if self.try_edge(Horizontal, y, y + 1)? {
                step.touch(Horizontal, y);
            }
        }

        let right = (1..width).rev()
            .find(|&x| !self.cols[x].is_completed() && (x == width-1 || self.cols[x+1].is_completed()));
        if let Some(x) = right {
            if self.try_edge(Vertical, x, x - 1)? {
                step.touch(Vertical, x);
            }
        }

        let bottom = (1..height).rev()
            .find(|&y| !self.rows[y].is_completed() && (y == height-1 || self.rows[y+1].is_completed()));
        if let Some(y) = bottom {
            if self.try_edge(Horizontal, y, y - 1)? {
                step.touch(Horizontal, y);
            }
        }

        let left = (0..width.saturating_sub(1))
            .find(|&x| !self.cols[x].is_completed() && (x == 0 || self.cols[x-1].is_completed()));
        if let Some(x) = left {
            if self.try_edge(Vertical, x, x + 1)? {
                step.touch(Vertical, x);
            }
        }

        Ok(self.record(step))
    }

    fn try_edge(&mut self, direction: Direction, index: usize, beside: usize) -> Result<bool>
    {
        let length = self.grid.strip_length(direction) as isize;
        let strip = index as isize;
        let mut changed = false;
        let mut size: isize = 0;

        for at in 0..=length {
            if self.status(direction, strip, at) != CrossedOut {
                size += 1;
                continue;
            }
            if size >= 2 {
                let mut low = at - (size + 1);
                for x in (at - size)..at {
                    if self.status(direction, strip, x) == Unknown {
                        changed |= self.try_edge_square(direction, index, beside, x, &mut low, at)?;
                    }
                }
            }
            size = 0;
        }
        Ok(changed)
    }

    // `low` and `high` are the crossed out squares around the gap being
    // examined; `low` moves up as squares in the gap get crossed out.
    fn try_edge_square(&mut self, direction: Direction, index: usize, beside: usize,
                       at: isize, low: &mut isize, high: isize)
        -> Result<bool>
    {
        let shortest = self.strip(direction, index).min_length_covering(at as usize);
        let mut fits = false;

        if let Some(size) = shortest.map(|s| s as isize) {
            if size <= high - (*low + 1) {
                let first = max(*low + 1, at + 1 - size);
                let last = min(high - size, at);
                for from in first..=last {
                    if self.projection_fits(direction, beside, index, from, size as usize, 1)? {
                        fits = true;
                        break;
                    }
                }
            }
        }
        if fits {
            return Ok(false);
        }

        trace!("{} {}: square {} cannot be filled in at the edge", direction.strip_name(), index + 1, at);
        self.mark_square(direction, index, at as usize, CrossedOut)?;
        *low = at;
        Ok(true)
    }

    /// Looks at each unknown square with crossed out neighbours on two
    /// sides. If it were filled in, it would start a run in its row and in
    /// its column; when the squares this forces next to the corner make the
    /// neighbouring row or column infeasible, the square is crossed out.
    pub fn try_corners(&mut self) -> Result<bool>
    {
        let mut step = Step::new(Rule::Corners);

        for y in 0..self.height() as isize {
            for x in 0..self.width() as isize {
                if self.status(Horizontal, y, x) != Unknown {
                    continue;
                }
                let crossed = |row: isize, col: isize| self.status(Horizontal, row, col) == CrossedOut;
                let (up, down, left, right) = (crossed(y-1, x), crossed(y+1, x), crossed(y, x-1), crossed(y, x+1));

                let (across, along) = match () {
                    _ if up && left    => (1, 1),
                    _ if up && right   => (1, -1),
                    _ if down && right => (-1, -1),
                    _ if down && left  => (-1, 1),
                    _ => continue,
                };

                if self.try_corner(Horizontal, y, x, across, along)? {
                    step.touch(Horizontal, y as usize);
                }
                if self.try_corner(Vertical, x, y, along, across)? {
                    step.touch(Vertical, x as usize);
                }
            }
        }
        Ok(self.record(step))
    }

    // The square `at` of strip `strip` has a crossed out square on the side
    // `-across` and on the side `-along`. Walks along the strip while the
    // squares on the `-across` side are crossed out and everything behind
    // them is known; that arm is where a run starting at the corner would
    // have to force squares in the strip at `strip + across`.
    fn try_corner(&mut self, direction: Direction, strip: isize, at: isize, across: isize, along: isize)
        -> Result<bool>
    {
        let strip_count = self.strips(direction).len() as isize;
        let strip_length = self.grid.strip_length(direction) as isize;
        let stop_across = if across == 1 { -1 } else { strip_count };
        let stop_along = if along == 1 { -1 } else { strip_length };

        let mut length: isize = 0;
        loop {
            let pos = at + length;
            if self.status(direction, strip - across, pos) != CrossedOut
               || self.status(direction, strip, pos) != Unknown {
                break;
            }
            let mut n = strip - across;
            while n != stop_across && self.status(direction, n, pos) != Unknown {
                n -= across;
            }
            if n != stop_across {
                break;
            }
            length += along;
        }

        let mut n = at - along;
        while n != stop_along && self.status(direction, strip, n) != Unknown {
            n -= along;
        }
        let length = length.abs() as usize;
        if n != stop_along || length < 2 {
            return Ok(false);
        }

        let beside = strip + across;
        let row = self.strip(direction, strip as usize);
        let run = match along {
            1 => row.first_undone_run(),
            _ => row.last_undone_run(),
        };
        let size = match run {
            Some(run) => run.length,
            None => return Err(Error::Invariant(
                    format!("{} {} has an unknown square but no undone run", direction.strip_name(), strip + 1))),
        };

        let count = min(size, length);
        let fits = if beside < 0 || beside >= strip_count {
            // past the edge every square is crossed out
            self.projection(direction, strip as usize, beside > strip, at, count, along)?
                .iter()
                .all(|&(_, wanted)| wanted == CrossedOut)
        } else {
            self.projection_fits(direction, beside as usize, strip as usize, at, count, along)?
        };
        if fits {
            return Ok(false);
        }
        trace!("{} {}: corner square {} cannot be filled in", direction.strip_name(), strip + 1, at);
        self.mark_square(direction, strip as usize, at as usize, CrossedOut)
    }

    /// Assumes `count` squares of strip `index`, from `from` in steps of
    /// `sign`, are filled in, and works out what that forces in the strip at
    /// `beside`. Returns whether `beside` can still be completed.
    pub(super) fn projection_fits(&self, direction: Direction, beside: usize, index: usize,
                                  from: isize, count: usize, sign: isize)
        -> Result<bool>
    {
        let mut line = self.grid.line(direction, beside);
        for (pos, wanted) in self.projection(direction, index, index < beside, from, count, sign)? {
            let current = line.get(pos);
            if current != Unknown && current != wanted {
                return Ok(false);
            }
            line.put(pos as usize, wanted);
        }

        let mut trial = self.strip(direction, beside).clone();
        Ok(trial.find_min_starts(&line))
    }

    // Squares forced next to strip `index`, on the side of higher indices if
    // `forward`: each crossing row or column continues its run there unless
    // the run is a single square.
    fn projection(&self, direction: Direction, index: usize, forward: bool,
                  from: isize, count: usize, sign: isize)
        -> Result<Vec<(isize, SquareStatus)>>
    {
        let cross = direction.orthogonal();
        let mut forced = vec![];

        for n in 0..count as isize {
            let pos = from + sign * n;
            if self.status(direction, index as isize, pos) != Unknown {
                continue;
            }
            let crossing = self.strip(cross, pos as usize);
            let run = match forward {
                true  => crossing.first_undone_run(),
                false => crossing.last_undone_run(),
            };
            let wanted: SquareStatus = match run {
                Some(run) if run.length == 1 => CrossedOut,
                Some(_) => FilledIn,
                None => return Err(Error::Invariant(
                        format!("{} {} has an unknown square but no undone run", cross.strip_name(), pos + 1))),
            };
            forced.push((pos, wanted));
        }
        Ok(forced)
    }
}
