use clap::{Parser as ClapParser, Subcommand};
use options_record::cli::{
    self, CheckOptions, CheckResult, CliError,
    logging::{LoggingConfig, init_logging},
};
use options_record::output::{to_literal, to_literal_pretty};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "optrec")]
#[command(about = "optrec - check, evaluate and inspect declarative control option records")]
#[command(version)]
struct Cli {
    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate an options record
    Check {
        /// The options record (reads from stdin if not provided)
        record: Option<String>,

        /// JSON object used as the local context
        #[arg(short, long)]
        scope: Option<String>,

        /// JSON object used as the global context
        #[arg(short, long)]
        global: Option<String>,

        /// Use environment variables as the global context
        #[arg(long, conflicts_with = "global")]
        env: bool,

        /// JSON object mapping selectors to values, callable as select('...')
        #[arg(short, long)]
        elements: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of an options record
    Tokens {
        /// The options record (reads from stdin if not provided)
        record: Option<String>,
    },

    /// Print the unevaluated syntax tree of an options record
    Ast {
        /// The options record (reads from stdin if not provided)
        record: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log,
        ..Default::default()
    });

    let result = match cli.command {
        Commands::Check {
            record,
            scope,
            global,
            env,
            elements,
            json,
            pretty,
            syntax_only,
        } => read_record(record).and_then(|record| {
            let options = CheckOptions {
                record,
                scope,
                global,
                env,
                elements,
                syntax_only,
            };
            run_check(&options, json, pretty)
        }),
        Commands::Tokens { record } => read_record(record).map(|record| {
            println!("{}", cli::format_tokens(&record));
        }),
        Commands::Ast { record } => read_record(record).and_then(|record| {
            let expr = options_record::parse_structural(&record)?;
            println!("{:#?}", expr);
            Ok(())
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_record(record: Option<String>) -> Result<String, CliError> {
    match record {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(options: &CheckOptions, json: bool, pretty: bool) -> Result<(), CliError> {
    match cli::execute_check(options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(value) if json => {
            let value = cli::value_to_json(value);
            let text = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", text);
        }
        CheckResult::Success(value) => {
            let text = if pretty {
                to_literal_pretty(&value)
            } else {
                to_literal(&value)
            };
            println!("{}", text);
        }
    }
    Ok(())
}
