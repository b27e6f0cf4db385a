// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;

use super::util::Direction;

/// The deduction that produced a step of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Read,
    Initialize,
    FullBounded,
    EmptyOutside,
    EmptyNoRoom,
    Block,
    Edges,
    Corners,
    SingleSquares,
    FullImpossible,
    EmptyImpossible,
    Guess { length: usize, direction: Direction },
}

impl Rule {
    fn phrase(&self) -> String {
        match self {
            Rule::Read            => "read problem".to_string(),
            Rule::Initialize      => "mark first surely full squares and empties in ".to_string(),
            Rule::FullBounded     => "mark surely full squares and empties in ".to_string(),
            Rule::EmptyOutside    => "mark surely empty squares in ".to_string(),
            Rule::EmptyNoRoom     => "mark empty squares where no room in ".to_string(),
            Rule::Block           => "mark empty or full squares for block in ".to_string(),
            Rule::Edges           => "mark empty edge squares in ".to_string(),
            Rule::Corners         => "mark empty corner squares in ".to_string(),
            Rule::SingleSquares   => "mark single empty or full squares in ".to_string(),
            Rule::FullImpossible  => "mark empty square where full impossible at ".to_string(),
            Rule::EmptyImpossible => "mark full square where empty impossible at ".to_string(),
            Rule::Guess { length, direction } =>
                format!("guess block {} long is in {} starting at ", length, direction.strip_name()),
        }
    }
}

/// One entry of the explanation log: a rule and the rows and columns
/// (zero-based) it made progress in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub rule: Rule,
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl Step {
    pub fn new(rule: Rule) -> Self {
        Step { rule, rows: vec![], cols: vec![] }
    }

    pub fn touch(&mut self, direction: Direction, index: usize) {
        let list = match direction {
            Direction::Horizontal => &mut self.rows,
            Direction::Vertical   => &mut self.cols,
        };
        if !list.contains(&index) {
            list.push(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

fn fmt_indices(name: &str, indices: &[usize]) -> String {
    let plural = if indices.len() > 1 { "s" } else { "" };
    let numbers = indices.iter()
                         .map(|i| (i + 1).to_string())
                         .collect::<Vec<_>>()
                         .join(" ");
    format!("{}{} {}", name, plural, numbers)
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Rule::Guess { length, direction } = self.rule {
            let (strips, starts) = match direction {
                Direction::Horizontal => (&self.rows, &self.cols),
                Direction::Vertical   => (&self.cols, &self.rows),
            };
            if let (Some(index), Some(start)) = (strips.first(), starts.first()) {
                return write!(f, "guess block {} long is in {} {} starting at {} {}",
                              length, direction.strip_name(), index + 1,
                              direction.orthogonal().strip_name(), start + 1);
            }
        }
        write!(f, "{}", self.rule.phrase())?;
        if !self.rows.is_empty() {
            write!(f, "{}", fmt_indices("row", &self.rows))?;
        }
        if !self.rows.is_empty() && !self.cols.is_empty() {
            write!(f, " and ")?;
        }
        if !self.cols.is_empty() {
            write!(f, "{}", fmt_indices("column", &self.cols))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::*;

    #[test]
    fn step_lists_rows_and_columns_one_based() {
        let mut step = Step::new(Rule::FullBounded);
        step.touch(Horizontal, 0);
        step.touch(Horizontal, 2);
        step.touch(Horizontal, 2);
        step.touch(Vertical, 1);
        assert_eq!(step.to_string(), "mark surely full squares and empties in rows 1 3 and column 2");
    }

    #[test]
    fn step_without_strips() {
        assert_eq!(Step::new(Rule::Read).to_string(), "read problem");
        assert!(Step::new(Rule::Read).is_empty());
    }

    #[test]
    fn guess_step() {
        let mut step = Step::new(Rule::Guess { length: 4, direction: Vertical });
        step.touch(Vertical, 6);
        step.touch(Horizontal, 2);
        assert_eq!(step.to_string(), "guess block 4 long is in column 7 starting at row 3");
    }
}
