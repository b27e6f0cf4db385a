// vim: set ai et ts=4 sts=4 sw=4:
use log::{debug, info};

use super::Puzzle;
use super::super::progress::Step;
use super::super::error::Result;

type RuleFn = fn(&mut Puzzle) -> Result<bool>;

/// How a call to `Solver::solve` ended.
#[derive(Debug)]
pub enum Outcome {
    /// Every solution found; just the first one unless all were asked for.
    Solved(Vec<Puzzle>),
    /// The rules got stuck and guessing was turned off.
    Unsolved(Puzzle),
    /// The puzzle has no answer.
    Contradiction,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub steps: usize,
    pub trials: usize,
    pub guesses: usize,
}

/// Drives the rules over a puzzle until nothing changes any more, and falls
/// back on guessing when the board is still undecided.
pub struct Solver<'a> {
    pub(super) find_all: bool,
    pub(super) guessing: bool,
    pub(super) contradict: bool,
    hook: Option<Box<dyn FnMut(&Puzzle, &Step) + 'a>>,
    pub stats: Stats,
}

impl<'a> Solver<'a> {
    pub fn new() -> Self {
        Solver {
            find_all: false,
            guessing: true,
            contradict: true,
            hook: None,
            stats: Stats::default(),
        }
    }

    pub fn find_all(mut self, find_all: bool) -> Self {
        self.find_all = find_all;
        self
    }
    pub fn guessing(mut self, guessing: bool) -> Self {
        self.guessing = guessing;
        self
    }
    pub fn contradiction(mut self, contradict: bool) -> Self {
        self.contradict = contradict;
        self
    }
    /// Called with the board and the step just taken, after every rule
    /// application that made progress.
    pub fn on_step<F>(mut self, hook: F) -> Self
        where F: FnMut(&Puzzle, &Step) + 'a
    {
        self.hook = Some(Box::new(hook));
        self
    }

    // For hypotheses: no hook, no guessing, no nested contradiction testing.
    pub(super) fn quiet() -> Self {
        Solver::new().guessing(false).contradiction(false)
    }

    pub fn solve(&mut self, mut puzzle: Puzzle) -> Result<Outcome>
    {
        if let Some(hook) = self.hook.as_mut() {
            for step in puzzle.steps() {
                hook(&puzzle, step);
            }
        }

        let contradict = self.contradict;
        match self.propagate(&mut puzzle, contradict) {
            Err(e) if e.is_contradiction() => {
                info!("{}", e);
                return Ok(Outcome::Contradiction);
            },
            Err(e) => return Err(e),
            Ok(()) => {},
        }

        if puzzle.is_solved() {
            info!("solved without guessing");
            return Ok(Outcome::Solved(vec![puzzle]));
        }
        if !self.guessing {
            info!("stuck with {} rows and columns undone", puzzle.undone());
            return Ok(Outcome::Unsolved(puzzle));
        }

        let mut solutions = vec![];
        self.try_guessing(&puzzle, &mut solutions)?;
        info!("{} solution(s) after {} guesses", solutions.len(), self.stats.guesses);
        match solutions.is_empty() {
            true  => Ok(Outcome::Contradiction),
            false => Ok(Outcome::Solved(solutions)),
        }
    }

    /// Applies the rules in order of cost, going back to the cheapest ones
    /// whenever anything changed, until the puzzle is solved or no rule makes
    /// progress.
    pub(super) fn propagate(&mut self, puzzle: &mut Puzzle, contradict: bool) -> Result<()>
    {
        while !puzzle.is_solved() {
            let local: [RuleFn; 3] = [Puzzle::try_full_bounded, Puzzle::try_empty_outside, Puzzle::try_no_room];
            if self.apply_all(puzzle, &local)? {
                continue;
            }
            if self.apply(puzzle, Puzzle::try_blocks)? {
                continue;
            }
            let speculative: [RuleFn; 2] = [Puzzle::try_edges, Puzzle::try_corners];
            if self.apply_all(puzzle, &speculative)? {
                continue;
            }
            if self.apply(puzzle, Puzzle::try_single_squares)? {
                continue;
            }
            if contradict {
                let progress = self.try_contradict(puzzle)?;
                self.report(puzzle, progress);
                if progress {
                    continue;
                }
            }
            debug!("no rule makes progress");
            break;
        }
        Ok(())
    }

    // Every rule gets its turn, whether or not an earlier one made progress.
    fn apply_all(&mut self, puzzle: &mut Puzzle, rules: &[RuleFn]) -> Result<bool>
    {
        let mut progress = false;
        for &rule in rules {
            progress |= self.apply(puzzle, rule)?;
        }
        Ok(progress)
    }

    fn apply(&mut self, puzzle: &mut Puzzle, rule: RuleFn) -> Result<bool>
    {
        let progress = rule(puzzle)?;
        self.report(puzzle, progress);
        Ok(progress)
    }

    pub(super) fn report(&mut self, puzzle: &Puzzle, progress: bool)
    {
        if !progress {
            return;
        }
        self.stats.steps += 1;
        if let (Some(hook), Some(step)) = (self.hook.as_mut(), puzzle.last_step()) {
            hook(puzzle, step);
        }
    }
}

impl<'a> Default for Solver<'a> {
    fn default() -> Self {
        Solver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    // the letter A
    fn letter() -> Puzzle {
        Puzzle::new(&[vec![3], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                    &[vec![4], vec![1, 1], vec![1, 1], vec![1, 1], vec![4]]).unwrap()
    }

    fn solutions(outcome: Outcome) -> Vec<Vec<String>> {
        match outcome {
            Outcome::Solved(found) => found.iter().map(|p| p.picture()).collect(),
            other => panic!("not solved: {:?}", other),
        }
    }

    #[test]
    fn solves_without_guessing() {
        let mut solver = Solver::new().guessing(false);
        let found = solutions(solver.solve(letter()).unwrap());
        assert_eq!(found, vec![vec![".###.", "#...#", "#####", "#...#", "#...#"]]);
        assert_eq!(solver.stats.guesses, 0);
    }

    #[test]
    fn stuck_without_guessing() {
        let puzzle = Puzzle::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
        match Solver::new().guessing(false).solve(puzzle).unwrap() {
            Outcome::Unsolved(puzzle) => assert_eq!(puzzle.undone(), 4),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn infeasible_puzzle() {
        let puzzle = Puzzle::new(&[vec![1, 1], vec![2], vec![1, 1]],
                                 &[vec![1, 1], vec![2], vec![1, 1]]).unwrap();
        match Solver::new().solve(puzzle).unwrap() {
            Outcome::Contradiction => {},
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn hook_sees_every_step() {
        let seen = RefCell::new(vec![]);
        let outcome = {
            let mut solver = Solver::new().on_step(|_, step| seen.borrow_mut().push(step.clone()));
            solver.solve(letter()).unwrap()
        };
        let solution = match outcome {
            Outcome::Solved(mut found) => found.remove(0),
            other => panic!("not solved: {:?}", other),
        };
        assert_eq!(&*seen.borrow(), solution.steps());
    }

    #[test]
    fn search_without_contradiction_testing() {
        let puzzle = Puzzle::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
        let mut solver = Solver::new().contradiction(false).find_all(true);
        let found = solutions(solver.solve(puzzle).unwrap());
        assert_eq!(found.len(), 2);
        assert_eq!(solver.stats.trials, 0);
    }
}
