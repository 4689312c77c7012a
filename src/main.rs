use std::io::{self, Read};

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use treexl::cli::{self, CheckResult, CliError, QuoteStyle, SqlOptions, SqlOutput};

#[derive(ClapParser)]
#[command(name = "treexl")]
#[command(about = "Treexl - A filter expression language that compiles to SQL WHERE clauses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an expression as a SQL WHERE fragment
    Sql {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Replace literals with parameters and print JSON with their values
        #[arg(long)]
        parameterize: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Escaping for quotes inside string literals
        #[arg(long, value_enum, default_value_t = QuoteArg::Double)]
        quote_style: QuoteArg,

        /// Upper-case column and function names
        #[arg(long)]
        upper_identifiers: bool,
    },

    /// Validate expression syntax
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the tokens of an expression
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the parsed tree and the names it references
    Inspect {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'treexl docs' to list categories)
        category: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QuoteArg {
    Double,
    Backslash,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Double => QuoteStyle::Double,
            QuoteArg::Backslash => QuoteStyle::Backslash,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TREEXL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sql {
            expression,
            parameterize,
            pretty,
            quote_style,
            upper_identifiers,
        } => run_sql(expression, parameterize, pretty, quote_style, upper_identifiers),
        Commands::Check { expression } => run_check(expression),
        Commands::Tokens { expression } => run_tokens(expression),
        Commands::Inspect { expression } => run_inspect(expression),
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

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_sql(
    expression: Option<String>,
    parameterize: bool,
    pretty: bool,
    quote_style: QuoteArg,
    upper_identifiers: bool,
) -> Result<(), CliError> {
    let options = SqlOptions {
        expression: read_expression(expression)?,
        parameterize,
        quote_style: quote_style.into(),
        upper_identifiers,
    };

    match cli::execute_sql(&options)? {
        SqlOutput::Sql(sql) => println!("{}", sql),
        output @ SqlOutput::Parameterized { .. } => {
            let json = if pretty {
                serde_json::to_string_pretty(&output.to_json())
            } else {
                serde_json::to_string(&output.to_json())
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_check(expression: Option<String>) -> Result<(), CliError> {
    match cli::execute_check(&read_expression(expression)?)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), CliError> {
    for token in cli::execute_tokens(&read_expression(expression)?)? {
        println!("{:>3}  {}", token.line, token);
    }
    Ok(())
}

fn run_inspect(expression: Option<String>) -> Result<(), CliError> {
    let inspection = cli::execute_inspect(&read_expression(expression)?)?;
    println!("{:#?}", inspection.tree);
    println!("identifiers: {}", inspection.identifiers.join(", "));
    println!("parameters: {}", inspection.parameters.join(", "));
    Ok(())
}
