//! luna command-line interface.

use lunac::commands::{check_file, lex_file, parse_file, run_format};
use lunac::options::{parse_options, Options};

fn main() {
    lunac::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let ok = match command {
        "lex" => each_path(command, &options, lex_file),
        "parse" => each_path(command, &options, parse_file),
        "check" => each_path(command, &options, check_file),
        "fmt" => run_format(&options),
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("luna {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

/// Run `run` on every path, continuing past failures so every file is
/// reported.
fn each_path(command: &str, options: &Options, run: fn(&str, &Options) -> bool) -> bool {
    if options.paths.is_empty() {
        eprintln!("Usage: luna {command} <file.luau>... [options]");
        std::process::exit(2);
    }
    options
        .paths
        .iter()
        .fold(true, |ok, path| run(path, options) && ok)
}

fn print_usage() {
    println!("luna: Luau lexer, parser, formatter and checker");
    println!();
    println!("Usage: luna <command> [paths...] [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  parse <file>         Parse and display a statement outline");
    println!("  fmt [files]          Print files in normalised form (stdin if none)");
    println!("  check <file>         Parse and type check");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("A path of `-` reads stdin.");
    println!();
    println!("Options:");
    println!("  --edition=<year>          Language edition: 2024 (default), 2026");
    println!("  --feature=<name,...>      Enable grammar extensions, or `all`:");
    for (name, _) in luna_parse::FEATURE_NAMES {
        println!("                              {name}");
    }
    println!("  --long-brackets=<mode>    Read `t[[[k]]]` as `long` strings or `index` brackets");
    println!("  --declarations            Parse as a declaration file");
    println!("  --json                    Report diagnostics as JSON lines on stdout");
    println!("  --color=<mode>            auto (default), always, never");
    println!("  --check                   fmt: list unformatted files instead of printing");
    println!();
    println!("Examples:");
    println!("  luna check main.luau");
    println!("  luna parse --edition=2026 main.luau");
    println!("  luna fmt --feature=all --check src/*.luau");
    println!("  RUST_LOG=luna_parse=debug luna parse main.luau");
}
