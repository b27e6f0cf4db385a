// vim: set ai et ts=4 sts=4 sw=4:
use log::trace;

use super::Row;
use super::super::grid::{Line, SquareStatus::{CrossedOut, FilledIn, Unknown}};
use super::super::error::{Error, Result};

impl Row {
    /// Initial bounds, from packing all runs against the left and against the
    /// right end of an empty row. Squares common to both packings are filled
    /// in; a row whose runs are all completed has its remaining squares
    /// crossed out.
    pub fn initialize(&mut self, line: &mut Line) -> Result<()>
    {
        if self.is_trivially_empty() {
            for run_index in 0..self.runs.len() {
                self.complete_run(run_index);
            }
        } else {
            let mut place = 0;
            for run in self.runs.iter_mut() {
                run.start = place;
                place += run.length + 1;
            }

            let name = self.name();
            let mut place = self.length as isize - 1;
            for run in self.runs.iter_mut().rev() {
                if place < (run.start + run.length) as isize - 1 {
                    return Err(Error::Contradiction(format!("runs of {} do not fit", name)));
                }
                run.end = place as usize;
                place -= run.length as isize + 1;
            }

            for run_index in 0..self.runs.len() {
                let overlap = self.runs[run_index].overlap();
                for x in overlap {
                    line.fill(x as isize)?;
                }
                let run = &self.runs[run_index];
                if run.end + 1 - run.start == run.length {
                    self.complete_run(run_index);
                }
            }
        }

        if self.is_completed() {
            self.cross_out_unknowns(line);
        }
        Ok(())
    }

    /// Moves each run's start to the leftmost position consistent with the
    /// known squares in `line`, keeping later runs separated from earlier ones
    /// by at least one square. Returns false if no such arrangement exists.
    pub fn find_min_starts(&mut self, line: &Line) -> bool
    {
        if self.is_trivially_empty() {
            return !line.squares().contains(&FilledIn);
        }

        let last = self.runs.len() as isize - 1;
        let stop = self.length as isize;
        let mut pat = last;
        let mut at = stop - 1;

        while at > -1 && pat > -1 {
            let run = &self.runs[pat as usize];
            let start = run.start as isize;
            let length = run.length as isize;

            if start > at {
                pat -= 1;
            } else if line.is(at, FilledIn) && start + length - 1 < at {
                // the block has to reach this square at the very least
                if !self.shift_runs_right(pat as usize, at + 1 - length) {
                    return false;
                }
                pat = last;
                at = stop - 1;
            } else if line.is(at, CrossedOut) && start + length - 1 >= at {
                if !self.shift_runs_right(pat as usize, at + 1) {
                    return false;
                }
                pat = last;
                at = stop - 1;
            } else {
                at -= 1;
            }
        }

        // nothing is left to cover squares before the first run
        (0..=at).all(|x| !line.is(x, FilledIn))
    }

    fn shift_runs_right(&mut self, run_index: usize, to: isize) -> bool
    {
        let stop = self.length as isize;
        let length = self.runs[run_index].length as isize;
        if to + length > stop {
            return false;
        }
        trace!("{}: shifting run {} to start at {}", self.name(), run_index, to);
        self.runs[run_index].start = to as usize;

        let mut next = to + length + 1;
        for run in self.runs.iter_mut().skip(run_index + 1) {
            if run.start as isize >= next {
                break;
            }
            if next + run.length as isize > stop {
                return false;
            }
            run.start = next as usize;
            next += run.length as isize + 1;
        }
        true
    }

    /// Mirror image of `find_min_starts`: moves each run's end to the
    /// rightmost position consistent with `line`. Only called once the
    /// leftmost arrangement is known to fit inside the current bounds, so a
    /// failure here means the bookkeeping went wrong.
    pub fn find_max_ends(&mut self, line: &Line) -> Result<()>
    {
        if self.is_trivially_empty() {
            return Ok(());
        }

        let count = self.runs.len();
        let stop = self.length as isize;
        let mut pat = 0;
        let mut at = 0;

        while at < stop && pat < count {
            let run = &self.runs[pat];
            let end = run.end as isize;
            let length = run.length as isize;

            if end < at {
                pat += 1;
            } else if line.is(at, FilledIn) && end - length + 1 > at {
                self.shift_runs_left(pat, at + length - 1)?;
                pat = 0;
                at = 0;
            } else if line.is(at, CrossedOut) && end - length + 1 <= at {
                self.shift_runs_left(pat, at - 1)?;
                pat = 0;
                at = 0;
            } else {
                at += 1;
            }
        }

        if (at..stop).any(|x| line.is(x, FilledIn)) {
            return Err(Error::Invariant(format!("{}: filled square after the last run", self.name())));
        }
        Ok(())
    }

    fn shift_runs_left(&mut self, run_index: usize, to: isize) -> Result<()>
    {
        let length = self.runs[run_index].length as isize;
        if to - length < -1 {
            return Err(Error::Invariant(format!("{}: run {} shifted past the start", self.name(), run_index)));
        }
        trace!("{}: shifting run {} to end at {}", self.name(), run_index, to);
        self.runs[run_index].end = to as usize;

        let name = self.name();
        let mut next = to - length - 1;
        for run in self.runs[..run_index].iter_mut().rev() {
            if (run.end as isize) <= next {
                break;
            }
            if next - (run.length as isize) < -1 {
                return Err(Error::Invariant(format!("{}: run {} shifted past the start", name, run.index)));
            }
            run.end = next as usize;
            next -= run.length as isize + 1;
        }
        Ok(())
    }

    /// Commits run `run_index` to the block starting at `at`: its bounds are
    /// pinned to the block, neighbouring runs are pushed out of the way, the
    /// block is filled in and the squares on either side are crossed out.
    pub fn pin_run(&mut self, run_index: usize, at: usize, line: &mut Line) -> Result<()>
    {
        let length = self.runs[run_index].length;
        if !self.shift_runs_right(run_index, at as isize) {
            return Err(Error::Contradiction(
                format!("run {} of {} cannot start at {}", run_index + 1, self.name(), at)));
        }
        self.shift_runs_left(run_index, (at + length) as isize - 1)?;

        for x in at..at + length {
            line.fill(x as isize)?;
        }
        line.cross_out(at as isize - 1)?;
        line.cross_out((at + length) as isize)?;
        self.complete_run(run_index);

        if self.is_completed() {
            self.cross_out_unknowns(line);
        }
        Ok(())
    }

    /// Runs whose leftmost block no longer fits before their rightmost end.
    pub(crate) fn check_bounds(&self) -> Result<()>
    {
        match self.runs.iter().find(|run| run.start + run.length > run.end + 1) {
            Some(run) => Err(Error::Contradiction(
                format!("run {} of {} no longer fits between {} and {}",
                        run.index + 1, self.name(), run.start, run.end))),
            None => Ok(()),
        }
    }

    pub(crate) fn cross_out_unknowns(&self, line: &mut Line)
    {
        for x in 0..line.len() {
            if line.is(x as isize, Unknown) {
                line.put(x, CrossedOut);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::util::Direction::*;

    fn row(length: usize, runs: &[usize]) -> Row {
        Row::new(Horizontal, 0, length, runs)
    }
    fn starts(row: &Row) -> Vec<usize> {
        row.runs.iter().map(|r| r.start).collect()
    }
    fn ends(row: &Row) -> Vec<usize> {
        row.runs.iter().map(|r| r.end).collect()
    }

    // every placement of the runs consistent with the line, as start positions
    fn placements(length: usize, runs: &[usize], line: &Line) -> Vec<Vec<usize>> {
        fn place(length: usize, runs: &[usize], from: usize, acc: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if acc.len() == runs.len() {
                out.push(acc.clone());
                return;
            }
            let len = runs[acc.len()];
            let mut s = from;
            while s + len <= length {
                acc.push(s);
                place(length, runs, s + len + 1, acc, out);
                acc.pop();
                s += 1;
            }
        }
        let mut all = vec![];
        place(length, runs, 0, &mut vec![], &mut all);
        all.into_iter()
           .filter(|p| {
               (0..length).all(|x| {
                   let covered = p.iter().zip(runs).any(|(&s, &len)| s <= x && x < s + len);
                   match line.get(x as isize) {
                       FilledIn   => covered,
                       CrossedOut => !covered,
                       _          => true,
                   }
               })
           })
           .collect()
    }

    #[test]
    fn initial_packing() {
        let mut r = row(5, &[2, 1]);
        let mut line = Line::unknown(5);
        r.initialize(&mut line).unwrap();
        assert_eq!(starts(&r), vec![0, 3]);
        assert_eq!(ends(&r), vec![2, 4]);
        assert_eq!(line.to_string(), " #   ");
        assert!(!r.is_completed());
    }

    #[test]
    fn initial_packing_that_fills_the_row() {
        let mut r = row(6, &[3, 2]);
        let mut line = Line::unknown(6);
        r.initialize(&mut line).unwrap();
        assert!(r.is_completed());
        assert_eq!(line.to_string(), "###.##");
    }

    #[test]
    fn zero_run_crosses_out_everything() {
        let mut r = row(4, &[0]);
        let mut line = Line::unknown(4);
        r.initialize(&mut line).unwrap();
        assert!(r.is_completed());
        assert_eq!(line.to_string(), "....");
    }

    #[test]
    fn runs_that_do_not_fit() {
        let mut r = row(4, &[2, 2]);
        assert!(r.initialize(&mut Line::unknown(4)).unwrap_err().is_contradiction());
    }

    #[test]
    fn min_starts_move_past_crossed_out_squares() {
        let mut r = row(8, &[2, 1]);
        r.initialize(&mut Line::unknown(8)).unwrap();
        let line = Line::from(" .      ");
        assert!(r.find_min_starts(&line));
        assert_eq!(starts(&r), vec![2, 5]);
    }

    #[test]
    fn min_starts_reach_filled_squares() {
        let mut r = row(8, &[2, 1]);
        r.initialize(&mut Line::unknown(8)).unwrap();
        let line = Line::from("      # ");
        assert!(r.find_min_starts(&line));
        assert_eq!(starts(&r), vec![0, 6]);

        let line = Line::from("    ##  ");
        assert!(r.find_min_starts(&line));
        assert_eq!(starts(&r), vec![4, 7]);
        assert!(!r.find_min_starts(&Line::from("     ## ")));
    }

    #[test]
    fn min_starts_fail_on_uncovered_square() {
        let mut r = row(6, &[1]);
        r.initialize(&mut Line::unknown(6)).unwrap();
        assert!(!r.find_min_starts(&Line::from("#   # ")));

        let mut r = row(3, &[]);
        r.initialize(&mut Line::unknown(3)).unwrap();
        assert!(r.find_min_starts(&Line::from("...")));
        assert!(!r.find_min_starts(&Line::from(".#.")));
    }

    #[test]
    fn max_ends_mirror_min_starts() {
        let mut r = row(8, &[2, 1]);
        r.initialize(&mut Line::unknown(8)).unwrap();
        let line = Line::from(" #    . ");
        assert!(r.find_min_starts(&line));
        r.find_max_ends(&line).unwrap();
        assert_eq!(starts(&r), vec![0, 3]);
        assert_eq!(ends(&r), vec![2, 7]);
    }

    #[test]
    fn extremes_match_enumeration() {
        let cases = vec![
            (vec![3, 1, 2], "          "),
            (vec![3, 1, 2], "  #  .   #"),
            (vec![1, 1, 1], " #   . #  "),
            (vec![2, 3],    ". #. ## . "),
            (vec![4],       "   #.     "),
            (vec![1, 2, 1], "#.   .  # "),
        ];
        for (runs, s) in cases {
            let runs: &[usize] = &runs;
            let line = Line::from(s);
            let all = placements(line.len(), runs, &line);
            assert!(!all.is_empty(), "{:?} {:?}", runs, s);

            let mut r = row(line.len(), runs);
            r.initialize(&mut Line::unknown(line.len())).unwrap();
            assert!(r.find_min_starts(&line));
            r.check_bounds().unwrap();
            r.find_max_ends(&line).unwrap();

            for (i, &len) in runs.iter().enumerate() {
                let min_start = all.iter().map(|p| p[i]).min().unwrap();
                let max_end = all.iter().map(|p| p[i] + len - 1).max().unwrap();
                assert_eq!(r.runs[i].start, min_start, "start of run {} in {:?}", i, s);
                assert_eq!(r.runs[i].end, max_end, "end of run {} in {:?}", i, s);
            }
        }
    }

    #[test]
    fn min_starts_are_repeatable() {
        let line = Line::from("  .  .  #   ");
        let mut r = row(12, &[2, 3, 1]);
        r.initialize(&mut Line::unknown(12)).unwrap();
        let mut again = r.clone();

        assert!(r.find_min_starts(&line));
        let first = starts(&r);
        assert!(r.find_min_starts(&line));
        assert_eq!(starts(&r), first);
        assert!(again.find_min_starts(&line));
        assert_eq!(starts(&again), first);
    }

    #[test]
    fn leftmost_blocks_stay_separated() {
        let mut r = row(12, &[2, 3, 1]);
        r.initialize(&mut Line::unknown(12)).unwrap();
        assert!(r.find_min_starts(&Line::from("  .  .  #   ")));
        for pair in r.runs.windows(2) {
            assert!(pair[1].start >= pair[0].start + pair[0].length + 1);
        }
    }

    #[test]
    fn pinned_run_pushes_its_neighbours() {
        let mut r = row(8, &[2, 1]);
        r.initialize(&mut Line::unknown(8)).unwrap();
        let mut line = Line::unknown(8);
        r.pin_run(0, 3, &mut line).unwrap();
        assert_eq!(line.to_string(), "  .##.  ");
        assert_eq!(starts(&r), vec![3, 6]);
        assert_eq!(ends(&r), vec![4, 7]);
        assert_eq!(r.undone(), 1);

        r.pin_run(1, 7, &mut line).unwrap();
        assert!(r.is_completed());
        assert_eq!(line.to_string(), "...##..#");
    }

    #[test]
    fn pinned_run_that_runs_off_the_end() {
        let mut r = row(6, &[2, 2]);
        r.initialize(&mut Line::unknown(6)).unwrap();
        assert!(r.pin_run(0, 3, &mut Line::unknown(6)).unwrap_err().is_contradiction());
    }
}
