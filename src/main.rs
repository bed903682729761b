use clap::{Parser as ClapParser, Subcommand};
use cohort_rule::cli::{
    self, CheckOptions, CheckResult, CliError, CombineOptions,
    logger::{self, LogLevel},
};
use cohort_rule::{LogicalOp, ParserOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "cohort-rule")]
#[command(about = "Cohort rules - parse, format and combine participant filter expressions")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr (-v debug, -vv every token)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Maximum nesting of parentheses, negations and calls
    #[arg(long, global = true, default_value_t = ParserOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rule
    Check {
        /// The rule (reads from stdin if not provided)
        rule: Option<String>,

        /// Print the syntax tree as JSON
        #[arg(long)]
        ast: bool,

        /// Pretty-print the syntax tree
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print a rule in canonical form
    Fmt {
        /// The rule (reads from stdin if not provided)
        rule: Option<String>,
    },

    /// Join rule fragments into one rule
    Combine {
        /// Connective placed between fragments
        #[arg(long, default_value = "and")]
        op: LogicalOp,

        /// Fragments to join; blank fragments are skipped
        #[arg(required = true)]
        fragments: Vec<String>,
    },

    /// List the variables a rule refers to
    Vars {
        /// The rule (reads from stdin if not provided)
        rule: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cohort-rule docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    logger::init_with_level(LogLevel::from_flags(cli.verbose, cli.quiet));

    let parser = ParserOptions::default().with_max_depth(cli.max_depth);

    let result = match cli.command {
        Commands::Check { rule, ast, pretty } => run_check(rule, ast, pretty, parser),
        Commands::Fmt { rule } => read_rule(rule)
            .and_then(|rule| cli::execute_format(&rule, &parser))
            .map(|text| println!("{}", text)),
        Commands::Combine { op, fragments } => {
            let options = CombineOptions {
                fragments,
                op,
                parser,
            };
            cli::execute_combine(&options).map(|text| println!("{}", text))
        }
        Commands::Vars { rule } => read_rule(rule)
            .and_then(|rule| cli::execute_vars(&rule, &parser))
            .map(|vars| vars.iter().for_each(|v| println!("{}", v))),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Uses the argument when given, otherwise reads piped stdin.
fn read_rule(rule: Option<String>) -> Result<String, CliError> {
    match rule {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    rule: Option<String>,
    ast: bool,
    pretty: bool,
    parser: ParserOptions,
) -> Result<(), CliError> {
    let options = CheckOptions {
        rule: read_rule(rule)?,
        ast,
        parser,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Rule is valid"),
        CheckResult::Ast(tree) => {
            let json = if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
