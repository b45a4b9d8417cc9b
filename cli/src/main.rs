#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]

use args::Action;
use std::{env, process};
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod file_paths;
mod helper;
mod interrupt;
mod repl;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Outcome {
    Printed,
    Blank,
    Failed,
}

/// Evaluates one line, printing the result to stdout or the error to stderr.
fn print_evaluation(
    line: &str,
    context: &mut irrat_core::Context,
    int: &impl irrat_core::Interrupt,
) -> Outcome {
    match irrat_core::evaluate_with_interrupt(line, context, int) {
        Ok(res) if res.get_main_result().is_empty() => Outcome::Blank,
        Ok(res) => {
            println!("{}", res.get_main_result());
            Outcome::Printed
        }
        Err(msg) => {
            eprintln!("Error: {msg}");
            Outcome::Failed
        }
    }
}

fn print_help(at_prompt: bool) {
    println!("irrat evaluates expressions over exact fractions, e.g.");
    println!("    (5/7) / (5476/1053)     0.1 + 0.2 == 0.3     (7/3) // (11/7)");
    println!("    factor(360)     cfactor(1000003 * 1000033)     primes(30)");
    println!("Other functions: abs, num, den, approx");
    println!();
    println!("Version: {}", irrat_core::get_version());
    let show = |what: &str, path: Option<std::path::PathBuf>| match path {
        Some(path) => println!("{what} file: {}", path.display()),
        None => println!("No {} file location available", what.to_lowercase()),
    };
    show("Config", file_paths::get_config_file_location());
    show("History", file_paths::get_history_file_location());
    if at_prompt {
        println!("\nType `quit` or press Ctrl-D to leave.");
    }
}

fn init_logging() {
    // RUST_LOG=irrat_core=trace shows every simplification step
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(action: Action) -> i32 {
    match action {
        Action::Help => print_help(false),
        Action::Version => println!("{}", irrat_core::get_version()),
        Action::PrintDefaultConfig => println!("{}", config::DEFAULT_CONFIG_FILE),
        Action::Evaluate(expr) => {
            let mut context = config::read().core_context();
            let outcome = print_evaluation(&expr, &mut context, &interrupt::Never::default());
            return i32::from(outcome == Outcome::Failed);
        }
        Action::Interactive => {
            return match repl::Repl::new(&config::read()) {
                Ok(repl) => repl.run(),
                Err(e) => {
                    eprintln!("Error: failed to start interactive mode: {e}");
                    1
                }
            };
        }
    }
    0
}

fn main() {
    init_logging();
    process::exit(run(args::parse(env::args().skip(1))))
}
