mod render;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use regdfa::{ConversionContext, ConversionError, alphabet::RESERVED};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "regdfa")]
#[command(about = "regdfa - Convert a regular expression to a DFA")]
#[command(version)]
struct Cli {
    /// Log each pipeline stage (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the NFA and DFA for an expression
    Convert {
        /// Alphabet symbols, e.g. "a,b" (prompted for if omitted)
        #[arg(short, long)]
        alphabet: Option<String>,
        /// The regular expression (prompted for if omitted)
        expression: Option<String>,
        /// Also print the Thompson NFA
        #[arg(long)]
        nfa: bool,
        /// Print the DFA as a Graphviz digraph instead of a table
        #[arg(long)]
        dot: bool,
    },
    /// Validate an expression and show its concatenation-explicit form
    Check {
        /// Alphabet symbols, e.g. "a,b"
        #[arg(short, long)]
        alphabet: String,
        /// The regular expression
        expression: String,
    },
    /// Show the postfix form of an expression
    Postfix {
        /// Alphabet symbols, e.g. "a,b"
        #[arg(short, long)]
        alphabet: String,
        /// The regular expression
        expression: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Convert {
            alphabet,
            expression,
            nfa,
            dot,
        } => cmd_convert(alphabet, expression, nfa, dot),
        Commands::Check {
            alphabet,
            expression,
        } => cmd_check(&alphabet, &expression),
        Commands::Postfix {
            alphabet,
            expression,
        } => cmd_postfix(&alphabet, &expression),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Errors surfaced by the CLI
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Print `message` and read one line from stdin, without the newline
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message.bold());
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn cmd_convert(
    alphabet: Option<String>,
    expression: Option<String>,
    show_nfa: bool,
    dot: bool,
) -> Result<(), CliError> {
    let interactive = alphabet.is_none() || expression.is_none();
    if interactive {
        let reserved: Vec<String> = RESERVED.iter().map(|c| c.to_string()).collect();
        println!("This program converts a Regular Expression to a DFA.");
        println!("The following characters are reserved operators: {}", reserved.join(" "));
        println!();
    }

    let alphabet = match alphabet {
        Some(spec) => spec,
        None => prompt("Please enter a grammar (e.g., a,b): ")?,
    };
    let mut ctx = ConversionContext::from_spec(&alphabet)?;

    let expression = match expression {
        Some(expr) => expr,
        None => prompt("Please enter a regular expression (e.g., (a+b)*.a.b.b): ")?,
    };
    debug!("alphabet {} expression {:?}", ctx.alphabet(), expression);

    let conversion = ctx.convert(&expression)?;

    if dot {
        print!("{}", render::dfa_dot(&conversion.dfa));
        return Ok(());
    }

    println!("{} {}", "Concatenation:".bold(), conversion.normalized.cyan());
    println!("{} {}", "Postfix Expression:".bold(), conversion.postfix.cyan());

    if show_nfa {
        println!();
        println!("{}", "--- NFA Construction ---".bold());
        print!("{}", render::nfa_listing(&conversion.nfa));
    }

    println!();
    println!("{}", "--- DFA Transition Table ---".bold());
    print!("{}", render::dfa_table(&conversion.dfa));
    Ok(())
}

fn cmd_check(alphabet: &str, expression: &str) -> Result<(), CliError> {
    let ctx = ConversionContext::from_spec(alphabet)?;
    let normalized = ctx.check(expression)?;

    println!("{}", "✓ Valid expression".green().bold());
    println!("  Alphabet:      {}", ctx.alphabet().to_string().yellow());
    println!("  Concatenation: {}", normalized.cyan());
    Ok(())
}

fn cmd_postfix(alphabet: &str, expression: &str) -> Result<(), CliError> {
    let ctx = ConversionContext::from_spec(alphabet)?;
    println!("{}", ctx.postfix(expression)?.green());
    Ok(())
}
