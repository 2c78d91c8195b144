use std::{
    fs::read_to_string,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use monkey::{
    lexer::lexer::{tokenize, Lexer},
    parser::parser::parse,
    render_error,
    repl::{self, Mode},
};

/// Parser for the Monkey programming language
#[derive(Parser)]
#[command(name = "monkey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt (default)
    Repl {
        /// Print tokens instead of the parsed program
        #[arg(long)]
        tokens: bool,
    },

    /// Parse a file and print the canonical rendering of the program
    Parse {
        /// Input file
        file: PathBuf,
    },

    /// Tokenize a file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let result = match cli.command.unwrap_or(Commands::Repl { tokens: false }) {
        Commands::Repl { tokens } => run_repl(tokens),
        Commands::Parse { file } => run_parse(&file),
        Commands::Lex { file } => run_lex(&file),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run_repl(tokens: bool) -> io::Result<ExitCode> {
    let mode = if tokens { Mode::Tokens } else { Mode::Parse };

    println!("This is the Monkey programming language!");
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    repl::start(stdin.lock(), &mut io::stdout(), mode)?;
    Ok(ExitCode::SUCCESS)
}

fn run_parse(file: &Path) -> io::Result<ExitCode> {
    let source = read_to_string(file)?;
    let parsed = parse(Lexer::new(source.clone(), Some(display_name(file))));

    if !parsed.is_ok() {
        for error in parsed.errors() {
            eprint!("{}", render_error(error, &source));
        }
        eprintln!("{} error(s) found", parsed.errors().len());
        return Ok(ExitCode::FAILURE);
    }

    let mut stdout = io::stdout();
    for stmt in parsed.program.iter() {
        writeln!(stdout, "{}", stmt)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_lex(file: &Path) -> io::Result<ExitCode> {
    let source = read_to_string(file)?;

    let mut stdout = io::stdout();
    for token in tokenize(source, Some(display_name(file))) {
        writeln!(stdout, "{}", token)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}
