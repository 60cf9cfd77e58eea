use std::io::{self, Write};

use clap::Parser;
use ternac::run;

/// ternac compiles an arithmetic expression into three-address code through a
/// ternary parse tree, then evaluates it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the parse tree after a successful run.
    #[arg(short, long)]
    tree: bool,

    /// Only print the final result, without the instruction and substitution
    /// traces. Also silences logging.
    #[arg(short, long)]
    quiet: bool,

    /// Increase log output on stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The expression to compile. Read from a single line of standard input
    /// when omitted.
    expression: Option<String>,
}

/// Prompts for and reads one line of standard input.
fn read_expression() -> io::Result<String> {
    print!("Expression: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = stderrlog::new().module("ternac")
                                    .quiet(args.quiet)
                                    .verbosity(usize::from(args.verbose) + 1)
                                    .init()
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    let source = match args.expression {
        Some(expression) => expression,
        None => read_expression().unwrap_or_else(|e| {
                                     eprintln!("Failed to read the expression from stdin: {e}");
                                     std::process::exit(1);
                                 }),
    };

    let report = match run(&source) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if !args.quiet {
        println!("Tokenized: {}\n", report.compilation.tokenized());
        println!("Internal representation");
        println!("{}", report.compilation.program());
        println!("Value substitution");
        for step in &report.evaluation.trace {
            println!("{step}");
        }
        println!();
    }

    println!("{}", report.value());

    if args.tree {
        println!();
        print!("{}", report.compilation.tree());
    }
}
