// vim: set ai et ts=4 sw=4 sts=4:
use nonogram::{Error, Outcome, Puzzle, Rule, Solver, SquareStatus};

// run lengths of the rows and the columns of a picture drawn with '#'
fn clues(picture: &[&str]) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    fn runs(squares: &[bool]) -> Vec<usize> {
        squares.split(|&full| !full)
               .map(|block| block.len())
               .filter(|&len| len > 0)
               .collect()
    }
    let grid: Vec<Vec<bool>> = picture.iter()
                                      .map(|line| line.chars().map(|c| c == '#').collect())
                                      .collect();
    let width = grid[0].len();
    let rows = grid.iter().map(|row| runs(row)).collect();
    let cols = (0..width).map(|x| runs(&grid.iter().map(|row| row[x]).collect::<Vec<_>>()))
                         .collect();
    (rows, cols)
}

fn puzzle_of(picture: &[&str]) -> Puzzle {
    let (rows, cols) = clues(picture);
    Puzzle::new(&rows, &cols).unwrap()
}

fn pictures(outcome: Outcome) -> Vec<Vec<String>> {
    match outcome {
        Outcome::Solved(found) => found.iter().map(|p| p.picture()).collect(),
        other => panic!("not solved: {:?}", other),
    }
}

#[test]
fn clue_helper() {
    let (rows, cols) = clues(&["##.#", "....", ".###"]);
    assert_eq!(rows, vec![vec![2, 1], vec![], vec![3]]);
    assert_eq!(cols, vec![vec![1], vec![1, 1], vec![1], vec![1, 1]]);
}

#[test]
fn unique_picture_is_found() {
    let picture = [
        "..##..",
        ".####.",
        "######",
        "#.##.#",
        "..##..",
        ".#..#.",
    ];
    let mut solver = Solver::new().find_all(true);
    let found = pictures(solver.solve(puzzle_of(&picture)).unwrap());
    assert!(found.iter().any(|p| p == &picture));
    for solution in &found {
        let rows: Vec<&str> = solution.iter().map(|s| s.as_str()).collect();
        assert_eq!(clues(&rows), clues(&picture));
    }
}

#[test]
fn small_puzzle_without_guessing() {
    let picture = [".####", ".#...", "#....", "#...."];
    let found = pictures(Solver::new().guessing(false).solve(puzzle_of(&picture)).unwrap());
    assert_eq!(found, vec![picture.iter().map(|s| s.to_string()).collect::<Vec<_>>()]);
}

#[test]
fn every_solution_once() {
    // any permutation matrix fits
    let puzzle = Puzzle::new(&[vec![1], vec![1], vec![1]], &[vec![1], vec![1], vec![1]]).unwrap();
    let mut solver = Solver::new().find_all(true);
    let mut found = pictures(solver.solve(puzzle).unwrap());
    assert_eq!(found.len(), 6);
    found.sort();
    found.dedup();
    assert_eq!(found.len(), 6);
}

#[test]
fn first_solution_only() {
    let puzzle = Puzzle::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
    let found = pictures(Solver::new().solve(puzzle).unwrap());
    assert_eq!(found.len(), 1);
    let first = &found[0];
    assert!(first == &vec!["#.", ".#"] || first == &vec![".#", "#."]);
}

#[test]
fn guesses_are_explained() {
    let puzzle = Puzzle::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
    let solution = match Solver::new().solve(puzzle).unwrap() {
        Outcome::Solved(mut found) => found.remove(0),
        other => panic!("not solved: {:?}", other),
    };
    let steps = solution.steps();
    assert_eq!(steps[0].rule, Rule::Read);
    assert!(steps.iter().any(|s| s.to_string() == "guess block 1 long is in row 1 starting at column 1"));
}

#[test]
fn no_answer() {
    let puzzle = Puzzle::new(&[vec![1, 1], vec![2], vec![1, 1]],
                             &[vec![1, 1], vec![2], vec![1, 1]]).unwrap();
    match Solver::new().solve(puzzle).unwrap() {
        Outcome::Contradiction => {},
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn totals_are_checked_first() {
    match Puzzle::new(&[vec![2], vec![1]], &[vec![1], vec![1]]) {
        Err(Error::Inconsistent { rows: 3, cols: 2 }) => {},
        other => panic!("unexpected result: {:?}", other.map(|p| p.picture())),
    }
}

#[test]
fn stuck_board_keeps_its_progress() {
    let puzzle = Puzzle::new(&[vec![1], vec![1]], &[vec![1], vec![1]]).unwrap();
    match Solver::new().guessing(false).solve(puzzle).unwrap() {
        Outcome::Unsolved(puzzle) => {
            assert!(!puzzle.is_solved());
            assert_eq!(puzzle.square(0, 0), SquareStatus::Unknown);
        },
        other => panic!("unexpected outcome: {:?}", other),
    }
}
