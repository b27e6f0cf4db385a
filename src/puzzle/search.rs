// vim: set ai et ts=4 sw=4 sts=4:
use log::{debug, info, trace};

use super::{Puzzle, Solver};
use super::super::grid::SquareStatus::{self, CrossedOut, FilledIn, Unknown};
use super::super::progress::{Rule, Step};
use super::super::util::{Direction, Direction::*};
use super::super::error::{Error, Result};

// hypothesis to refute, the rule credited, and the status concluded
const HYPOTHESES: [(SquareStatus, Rule, SquareStatus); 2] = [
    (FilledIn,   Rule::FullImpossible,  CrossedOut),
    (CrossedOut, Rule::EmptyImpossible, FilledIn),
];

impl Puzzle {
    /// The undone run to guess on: the longest one, and among equally long
    /// runs the one with the fewest candidate placements. Rows are scanned
    /// before columns and the first best run wins.
    pub(super) fn find_best_run(&self) -> Option<(Direction, usize, usize)>
    {
        let mut best: Option<(Direction, usize, usize)> = None;
        let mut best_key = (0, 0);

        for &direction in &[Horizontal, Vertical] {
            for row in self.strips(direction).iter().filter(|row| !row.is_completed()) {
                for run in row.runs.iter().filter(|run| !run.is_completed()) {
                    let better = match best {
                        None => true,
                        Some(_) => run.length > best_key.0
                                || (run.length == best_key.0 && run.span() < best_key.1),
                    };
                    if better {
                        best = Some((direction, row.index, run.index));
                        best_key = (run.length, run.span());
                    }
                }
            }
        }
        best
    }

    /// Whether a block of `length` squares can start at `at`: none of its
    /// squares is crossed out and the squares just outside are not filled in.
    pub(super) fn placement_fits(&self, direction: Direction, index: usize, at: usize, length: usize) -> bool
    {
        let line = self.grid.line(direction, index);
        let at = at as isize;
        let stop = at + length as isize;

        (at..stop).all(|x| !line.is(x, CrossedOut))
            && !line.is(at - 1, FilledIn)
            && !line.is(stop, FilledIn)
    }

    /// Commits a run to the block starting at `at` and logs the guess.
    pub(super) fn impose_placement(&mut self, direction: Direction, index: usize, run_index: usize, at: usize)
        -> Result<()>
    {
        let length = self.strip(direction, index).runs[run_index].length;
        self.apply_to_strip(direction, index, |row, line| row.pin_run(run_index, at, line))?;

        let mut step = Step::new(Rule::Guess { length, direction });
        step.touch(direction, index);
        step.touch(direction.orthogonal(), at);
        self.record(step);
        Ok(())
    }
}

impl<'a> Solver<'a> {
    /// Tries both values of every unknown square in the rows that are not
    /// done yet. The first hypothesis whose propagation ends in a
    /// contradiction decides its square the other way, and the search stops
    /// there.
    pub(super) fn try_contradict(&mut self, puzzle: &mut Puzzle) -> Result<bool>
    {
        if puzzle.is_solved() {
            return Ok(false);
        }
        for y in 0..puzzle.height() {
            if puzzle.rows[y].is_completed() {
                continue;
            }
            for x in 0..puzzle.width() {
                if puzzle.square(x, y) != Unknown {
                    continue;
                }
                for &(hypothesis, rule, conclusion) in &HYPOTHESES {
                    if !self.refutes(puzzle, x, y, hypothesis)? {
                        continue;
                    }
                    debug!("square ({}, {}) cannot be {:?}", x + 1, y + 1, hypothesis);
                    puzzle.set_square(x, y, conclusion)?;

                    let mut step = Step::new(rule);
                    step.touch(Horizontal, y);
                    step.touch(Vertical, x);
                    puzzle.record(step);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    // Propagates the hypothesis on a throwaway copy of the board. Nested
    // contradiction testing is not attempted.
    fn refutes(&mut self, puzzle: &Puzzle, x: usize, y: usize, hypothesis: SquareStatus) -> Result<bool>
    {
        self.stats.trials += 1;
        let mut trial = puzzle.trial_copy();
        let outcome = trial.set_square(x, y, hypothesis)
                           .and_then(|_| Solver::quiet().propagate(&mut trial, false));
        match outcome {
            Ok(()) => Ok(false),
            Err(Error::Contradiction(reason)) => {
                trace!("({}, {}) as {:?}: {}", x + 1, y + 1, hypothesis, reason);
                Ok(true)
            },
            Err(e) => Err(e),
        }
    }

    /// Picks the best undone run and tries every placement of its block on a
    /// copy of the board, solving each copy recursively. Solutions are
    /// appended to `solutions`; unless all solutions are wanted, the search
    /// ends at the first one.
    pub(super) fn try_guessing(&mut self, puzzle: &Puzzle, solutions: &mut Vec<Puzzle>) -> Result<()>
    {
        let (direction, index, run_index) = match puzzle.find_best_run() {
            Some(best) => best,
            None => return Err(Error::Invariant("unsolved puzzle without an undone run".to_string())),
        };
        let run = &puzzle.strip(direction, index).runs[run_index];
        let (length, first, last) = (run.length, run.start, run.end + 1 - run.length);

        for at in first..=last {
            if !self.find_all && !solutions.is_empty() {
                break;
            }
            if !puzzle.placement_fits(direction, index, at, length) {
                continue;
            }
            self.stats.guesses += 1;
            info!("guessing run {} of {} {} at {}", run_index + 1, direction.strip_name(), index + 1, at + 1);

            match self.descend(puzzle.clone(), direction, index, run_index, at, solutions) {
                Err(Error::Contradiction(reason)) => debug!("guess abandoned: {}", reason),
                Err(e) => return Err(e),
                Ok(()) => {},
            }
        }
        Ok(())
    }

    fn descend(&mut self, mut branch: Puzzle, direction: Direction, index: usize, run_index: usize, at: usize,
               solutions: &mut Vec<Puzzle>)
        -> Result<()>
    {
        branch.impose_placement(direction, index, run_index, at)?;
        self.report(&branch, true);
        let contradict = self.contradict;
        self.propagate(&mut branch, contradict)?;

        if branch.is_solved() {
            info!("found solution {}", solutions.len() + 1);
            solutions.push(branch);
            return Ok(());
        }
        self.try_guessing(&branch, solutions)
    }
}
