// vim: set ai et ts=4 sts=4 sw=4:
use std::io;
use std::path::Path;
use std::process;

use clap::{App, Arg, ArgMatches, value_t};
use log::{info, LevelFilter};

use nonogram::{format, Error, Format, Outcome, Puzzle, Solver};
use nonogram::util::is_a_tty;

fn cli() -> App<'static, 'static> {
    App::new("nonogram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves nonogram puzzles")
        .arg(Arg::with_name("FILE")
             .help("Puzzle file, YAML (.yml/.yaml) or the text layout")
             .required(true)
             .index(1))
        .arg(Arg::with_name("all")
             .long("all")
             .help("Find all solutions instead of stopping at the first"))
        .arg(Arg::with_name("print-steps")
             .long("print-steps")
             .help("Print the board after every step that made progress"))
        .arg(Arg::with_name("explain")
             .long("explain")
             .help("Print the steps that led to each solution"))
        .arg(Arg::with_name("format")
             .long("format")
             .takes_value(true)
             .possible_values(&["yaml", "text"])
             .help("Input format; by default chosen from the file extension"))
        .arg(Arg::with_name("no-guess")
             .long("no-guess")
             .help("Stop when the rules get stuck instead of guessing"))
        .arg(Arg::with_name("no-contradict")
             .long("no-contradict")
             .help("Skip contradiction testing"))
        .arg(Arg::with_name("subdivision")
             .long("subdivision")
             .takes_value(true)
             .value_name("N")
             .default_value("5")
             .help("Draw subdivision lines every N squares, 0 for none"))
        .arg(Arg::with_name("no-color")
             .long("no-color")
             .help("Never color the output"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Log more; repeat for more detail"))
}

fn setup_logging(verbosity: u64) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn print_solution(puzzle: &Puzzle, subdivision: Option<usize>, emit_color: bool, explain: bool) {
    print!("{}", puzzle.render(subdivision, emit_color));
    if explain {
        for step in puzzle.steps() {
            println!("{}", step);
        }
    }
    println!();
}

// Returns whether the puzzle was solved.
fn run(matches: &ArgMatches) -> Result<bool, Error> {
    let file = value_t!(matches, "FILE", String).unwrap_or_else(|e| e.exit());
    let path = Path::new(&file);
    let format = match matches.value_of("format") {
        Some(name) => Some(name.parse::<Format>()?),
        None => None,
    };
    let subdivision = match value_t!(matches, "subdivision", usize).unwrap_or_else(|e| e.exit()) {
        0 => None,
        n => Some(n),
    };
    let emit_color = !matches.is_present("no-color") && is_a_tty(io::stdout());
    let explain = matches.is_present("explain");

    let puzzle = match format::load(path, format)?.into_puzzle() {
        Err(e) if e.is_contradiction() => {
            println!("{}", e);
            return Ok(false);
        },
        other => other?,
    };

    let mut solver = Solver::new()
        .find_all(matches.is_present("all"))
        .guessing(!matches.is_present("no-guess"))
        .contradiction(!matches.is_present("no-contradict"));
    if matches.is_present("print-steps") {
        solver = solver.on_step(move |puzzle, step| {
            print!("{}", puzzle.render(subdivision, emit_color));
            println!("{}\n", step);
        });
    }

    let outcome = solver.solve(puzzle)?;
    info!("{} steps, {} trials, {} guesses", solver.stats.steps, solver.stats.trials, solver.stats.guesses);

    match outcome {
        Outcome::Solved(solutions) => {
            for (n, solution) in solutions.iter().enumerate() {
                if solutions.len() > 1 {
                    println!("solution {}:", n + 1);
                }
                print_solution(solution, subdivision, emit_color, explain);
            }
            Ok(true)
        },
        Outcome::Unsolved(puzzle) => {
            print_solution(&puzzle, subdivision, emit_color, explain);
            println!("no rule makes progress; {} rows and columns left undone", puzzle.undone());
            Ok(false)
        },
        Outcome::Contradiction => {
            println!("puzzle has no answer");
            Ok(false)
        },
    }
}

fn main() {
    let matches = cli().get_matches();
    if let Err(e) = setup_logging(matches.occurrences_of("verbose")) {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    match run(&matches) {
        Ok(true) => {},
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        },
    }
}
