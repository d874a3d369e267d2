//! procscript - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use procscript::frontend::lexer::tokenize;
use procscript::frontend::parser::AstPrinter;
use procscript::frontend::Compiler;
use procscript::util::config::{load_user_config, RuntimeConfig};
use procscript::util::logger::{self, LogLevel};
use procscript::util::span::SourceFile;
use procscript::{run_with_config, ScriptError, NAME, VERSION};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An embeddable scripting runtime with cooperatively scheduled processes
#[derive(Parser, Debug)]
#[command(name = "procscript")]
#[command(author = "procscript contributors")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Minimum log level: debug, info, warn or error
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a script file
    Run {
        /// Source file to run
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum scheduler ticks after the main block
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evaluate code from the command line. Bare statements are wrapped in
    /// a program.
    Eval {
        /// Code to evaluate
        #[arg(value_name = "CODE")]
        code: String,

        /// Maximum scheduler ticks after the main block
        #[arg(short, long)]
        ticks: Option<u64>,
    },

    /// Lex and parse a file without running it
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Dump the token stream as JSON
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree
    Ast {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() {
    let args = Args::parse();

    let (mut config, config_error) = match load_user_config() {
        Ok(config) => (config, None),
        Err(e) => (RuntimeConfig::default(), Some(e)),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.verbose {
        config.log_level = LogLevel::Debug;
    }
    logger::init_with_level(config.log_level);

    if let Some(e) = config_error {
        warn!("Ignoring user config: {}", e);
    }
    if args.verbose {
        debug!("{} version: {}", NAME, VERSION);
        debug!("Host: {}", std::env::consts::OS);
    }

    if let Err(e) = execute(args.command, config) {
        std::process::exit(report(&e));
    }
}

fn execute(
    command: Commands,
    mut config: RuntimeConfig,
) -> Result<()> {
    match command {
        Commands::Run { file, ticks, seed } => {
            let source = read_source(&file)?;
            if let Some(ticks) = ticks {
                config.max_ticks = ticks;
            }
            if seed.is_some() {
                config.rng_seed = seed;
            }
            run_with_config(&source.content, &config).map_err(|e| with_source(e, &source))?;
        }
        Commands::Eval { code, ticks } => {
            if let Some(ticks) = ticks {
                config.max_ticks = ticks;
            }
            let source = SourceFile::new("<eval>", wrap_statements(&code));
            run_with_config(&source.content, &config).map_err(|e| with_source(e, &source))?;
        }
        Commands::Check { file } => {
            let source = read_source(&file)?;
            let mut compiler = Compiler::new();
            compiler
                .compile(&source.content)
                .map_err(|e| with_source(ScriptError::from(e).into(), &source))?;
            println!(
                "{} {} ({} tokens)",
                "ok:".green().bold(),
                file.display(),
                compiler.last_token_count()
            );
        }
        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            let tokens = tokenize(&source.content)
                .map_err(|e| with_source(ScriptError::from(e).into(), &source))?;
            let json = serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
            println!("{}", json);
        }
        Commands::Ast { file } => {
            let source = read_source(&file)?;
            let program = Compiler::new()
                .compile(&source.content)
                .map_err(|e| with_source(ScriptError::from(e).into(), &source))?;
            println!("{}", AstPrinter::new().print(&program));
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(SourceFile::new(path.display().to_string(), content))
}

/// `eval` accepts either a whole program or bare statements
fn wrap_statements(code: &str) -> String {
    if code.trim_start().to_ascii_lowercase().starts_with("program") {
        code.to_string()
    } else {
        format!("program eval;\nbegin\n{}\nend.", code)
    }
}

/// Source excerpt attached to a failed run
#[derive(Debug)]
struct Excerpt {
    location: String,
    line: usize,
    text: String,
}

impl std::fmt::Display for Excerpt {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}", self.location, self.line)
    }
}

fn with_source(
    err: anyhow::Error,
    source: &SourceFile,
) -> anyhow::Error {
    let Some(line) = err.downcast_ref::<ScriptError>().map(ScriptError::line) else {
        return err;
    };
    match source.line_text(line) {
        Some(text) => err.context(Excerpt {
            location: source.name.clone(),
            line,
            text: text.to_string(),
        }),
        None => err,
    }
}

/// Print an error chain and return the exit code
fn report(err: &anyhow::Error) -> i32 {
    let excerpt = err.downcast_ref::<Excerpt>();
    let cause = match excerpt {
        Some(_) => err.chain().nth(1).map(|c| c.to_string()).unwrap_or_default(),
        None => format!("{:#}", err),
    };
    eprintln!("{} {}", "error:".red().bold(), cause);

    if let Some(excerpt) = excerpt {
        let number = excerpt.line.to_string();
        let gutter = " ".repeat(number.len());
        eprintln!("{}{} {}", gutter, "-->".blue().bold(), excerpt);
        eprintln!("{} {}", gutter, "|".blue().bold());
        eprintln!("{} {} {}", number.blue().bold(), "|".blue().bold(), excerpt.text);
        eprintln!("{} {}", gutter, "|".blue().bold());
    }
    1
}
