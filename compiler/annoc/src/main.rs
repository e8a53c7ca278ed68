//! Annoc CLI
//!
//! Parse type expressions and check JSON values against them.

use annoc::commands::{check_value, parse_expr, render_outcome, CliOptions};
use annoc::Engine;

fn main() {
    annoc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let (options, positional) = match CliOptions::parse(&args[2..]) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let engine = Engine::new(options.config);

    match args[1].as_str() {
        "parse" => {
            let [text] = positional.as_slice() else {
                eprintln!("Usage: annoc parse <expr>");
                std::process::exit(2);
            };
            match parse_expr(&engine, text) {
                Ok(out) => print!("{out}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(2);
                }
            }
        }
        "check" => {
            let [text, value] = positional.as_slice() else {
                eprintln!("Usage: annoc check <expr> <json> [--none-valid] [--verbosity=N] [--json]");
                std::process::exit(2);
            };
            let outcome = match check_value(&engine, text, value) {
                Ok(outcome) => outcome,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(2);
                }
            };
            match render_outcome(&outcome, &options) {
                Ok(out) => println!("{out}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(2);
                }
            }
            if !outcome.valid {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("annoc {}", env!("CARGO_PKG_VERSION"));
        }
        unknown => {
            eprintln!("Unknown command: {unknown}");
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("Annoc - runtime type annotation checker");
    println!();
    println!("Usage: annoc <command> [args] [options]");
    println!();
    println!("Commands:");
    println!("  parse <expr>           Show how an expression compiles");
    println!("  check <expr> <json>    Check a JSON value against an expression");
    println!("  help                   Show this message");
    println!("  version                Show version");
    println!();
    println!("Options:");
    println!("  --none-valid           Accept null for every type");
    println!("  --verbosity=<n>        Diagnostic detail: 0, 1, 2");
    println!("  --json                 Print the outcome as JSON");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=annoc=debug) to enable tracing.");
}
