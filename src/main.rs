use std::{fs, process};

use clap::Parser;
use log::debug;
use safecalc::{Bindings, Error, Number, calc, defaults};

/// safecalc evaluates arithmetic expressions safely, with the default
/// operators and functions and any variables given on the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells safecalc to read the expression from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable, e.g. `--var x=3`. May be repeated.
    #[arg(short, long = "var", value_name = "NAME=NUMBER", value_parser = parse_var)]
    vars: Vec<(String, Number)>,

    /// Leaves out the default functions (`min`, `max`, `sin`, ...).
    #[arg(long)]
    no_defaults: bool,

    /// Maximum nesting depth accepted by the parser.
    #[arg(long, default_value_t = safecalc::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Prints the parsed expression tree instead of evaluating it.
    #[arg(long)]
    ast: bool,

    contents: String,
}

/// Parses `NAME=NUMBER`. The number may be any constant expression, so
/// `x=-2` and `y=1e3` both work and keep their class.
fn parse_var(s: &str) -> Result<(String, Number), String> {
    let (name, value) = s.split_once('=')
                         .ok_or_else(|| format!("expected NAME=NUMBER, found '{s}'"))?;
    let value = calc(value, &Bindings::new()).map_err(|e| e.to_string())?;
    Ok((name.trim().to_string(), value))
}

/// The expression text, from the command line or from `--file`.
fn read_source(args: &Args) -> String {
    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };
    source.trim().to_string()
}

fn run(args: Args, source: &str) -> Result<String, Error> {
    let grammar = defaults::operators().compile()?
                                       .with_max_depth(args.max_depth);

    if args.ast {
        return Ok(grammar.parse(source)?.to_string());
    }

    let mut bindings = if args.no_defaults {
        Bindings::new()
    } else {
        defaults::identifiers()
    };
    bindings.extend(args.vars.into_iter().collect());
    debug!("evaluating with {} bindings", bindings.len());

    Ok(grammar.evaluate(source, &bindings)?.to_string())
}

/// The source line holding byte offset `position`, with a caret under it.
fn marker(source: &str, position: usize) -> String {
    let Some((before, after)) = source.split_at_checked(position) else {
        return String::new();
    };

    let start = before.rfind('\n').map_or(0, |i| i + 1);
    let end = after.find('\n').map_or(source.len(), |i| position + i);
    let column = before[start..].chars().count();

    format!("  {}\n  {}^", &source[start..end], " ".repeat(column))
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let source = read_source(&args);

    match run(args, &source) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            if let Error::Parse(parse) = &e {
                eprintln!("{}", marker(&source, parse.position()));
            }
            process::exit(1);
        },
    }
}
