// vim: set ai et ts=4 sw=4 sts=4:
use super::Puzzle;
use super::super::grid::Line;
use super::super::row::Row;
use super::super::progress::{Rule, Step};
use super::super::util::Direction::*;
use super::super::error::Result;

// Board-wide application of the single-row rules: rows first, then columns.
impl Puzzle {
    fn apply_rule<F>(&mut self, rule: Rule, skip_completed: bool, f: F) -> Result<bool>
        where F: Fn(&mut Row, &mut Line) -> Result<()>
    {
        let mut step = Step::new(rule);
        for &direction in &[Horizontal, Vertical] {
            for index in 0..self.strips(direction).len() {
                if skip_completed && self.strip(direction, index).is_completed() {
                    continue;
                }
                if self.apply_to_strip(direction, index, &f)? {
                    step.touch(direction, index);
                }
            }
        }
        Ok(self.record(step))
    }

    pub(super) fn initialize(&mut self) -> Result<bool> {
        self.apply_rule(Rule::Initialize, false, |row, line| row.initialize(line))
    }

    pub fn try_full_bounded(&mut self) -> Result<bool> {
        self.apply_rule(Rule::FullBounded, true, |row, line| row.mark_runs(line))
    }

    pub fn try_empty_outside(&mut self) -> Result<bool> {
        self.apply_rule(Rule::EmptyOutside, true, |row, line| row.mark_outside(line))
    }

    pub fn try_no_room(&mut self) -> Result<bool> {
        self.apply_rule(Rule::EmptyNoRoom, true, |row, line| row.mark_no_room(line))
    }

    pub fn try_blocks(&mut self) -> Result<bool> {
        self.apply_rule(Rule::Block, true, |row, line| row.mark_blocks(line))
    }

    pub fn try_single_squares(&mut self) -> Result<bool> {
        self.apply_rule(Rule::SingleSquares, true, |row, line| row.try_single_squares(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::grid::SquareStatus::*;

    #[test]
    fn full_bounded_after_a_marked_square() {
        // the scenario of a [2, 1] row of five squares
        let mut puzzle = Puzzle::new(&[vec![2, 1], vec![1], vec![1]],
                                     &[vec![1], vec![2], vec![], vec![1, 1], vec![]]).unwrap();
        assert_eq!(puzzle.rows[0].runs.iter().map(|r| r.start).collect::<Vec<_>>(), vec![0, 3]);

        puzzle.set_square(2, 0, CrossedOut).unwrap();
        puzzle.try_full_bounded().unwrap();
        assert_eq!(puzzle.rows[0].runs.iter().map(|r| r.start).collect::<Vec<_>>(), vec![0, 3]);

        puzzle.set_square(0, 0, FilledIn).unwrap();
        puzzle.try_full_bounded().unwrap();
        assert_eq!(puzzle.square(1, 0), FilledIn);
    }

    #[test]
    fn rules_are_idempotent_at_fixpoint() {
        let mut puzzle = Puzzle::new(&[vec![3], vec![1, 1], vec![5], vec![1, 1], vec![1, 1]],
                                     &[vec![4], vec![1, 1], vec![1, 1], vec![1, 1], vec![4]]).unwrap();
        while puzzle.try_full_bounded().unwrap()
            | puzzle.try_empty_outside().unwrap()
            | puzzle.try_no_room().unwrap() {}
        let picture = puzzle.picture();
        assert!(!puzzle.try_full_bounded().unwrap());
        assert!(!puzzle.try_empty_outside().unwrap());
        assert!(!puzzle.try_no_room().unwrap());
        assert_eq!(puzzle.picture(), picture);
    }

    #[test]
    fn progress_is_logged_per_strip() {
        let mut puzzle = Puzzle::new(&[vec![1], vec![2]], &[vec![1], vec![2]]).unwrap();
        let logged = puzzle.steps().len();
        assert!(puzzle.try_full_bounded().unwrap());
        assert_eq!(puzzle.steps().len(), logged + 1);
        assert_eq!(puzzle.last_step().map(|s| s.rule), Some(Rule::FullBounded));
        assert!(puzzle.is_solved());
    }
}
