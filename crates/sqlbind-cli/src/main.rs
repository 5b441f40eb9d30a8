//! sqlbind CLI
//!
//! Command-line tool for tokenizing, parsing and compiling SQL statements.

use std::fmt::Write as _;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use sqlbind_core::{Compiler, CompilerConfig, ParserConfig, Schema, parse_with_config, tokenize};

/// Parse SQL statements and bind them to a schema.
#[derive(Parser)]
#[command(name = "sqlbind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON schema file used by `compile`.
    #[arg(short, long, env = "SQLBIND_SCHEMA")]
    schema: Option<PathBuf>,

    /// Maximum nesting of subqueries and parenthesized groups.
    #[arg(long, env = "SQLBIND_MAX_DEPTH", default_value_t = ParserConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum number of AND/OR connectives in one statement.
    #[arg(
        long,
        env = "SQLBIND_MAX_CONNECTIVES",
        default_value_t = ParserConfig::DEFAULT_MAX_CONNECTIVES
    )]
    max_connectives: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a statement.
    Tokens {
        /// The statement (read from stdin if omitted).
        sql: Option<String>,
    },

    /// Parse a statement and print its canonical form.
    Parse {
        /// The statement (read from stdin if omitted).
        sql: Option<String>,
    },

    /// Compile a statement against the schema and print the bound query.
    Compile {
        /// The statement (read from stdin if omitted).
        sql: Option<String>,
    },
}

impl Commands {
    fn sql(&self) -> Option<&str> {
        match self {
            Self::Tokens { sql } | Self::Parse { sql } | Self::Compile { sql } => sql.as_deref(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = match cli.command.sql() {
        Some(sql) => sql.to_string(),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read statement from stdin")?;
            input
        }
    };

    let output = run(&cli, &sql)?;
    println!("{output}");
    Ok(())
}

/// Executes the selected command on `sql` and returns what to print.
fn run(cli: &Cli, sql: &str) -> anyhow::Result<String> {
    let parser_config = ParserConfig::default()
        .with_max_depth(cli.max_depth)
        .with_max_connectives(cli.max_connectives);

    match &cli.command {
        Commands::Tokens { .. } => {
            let tokens = tokenize(sql)?;
            let mut out = String::new();
            for token in tokens.iter().filter(|t| !t.is_eof()) {
                writeln!(out, "{}:{}\t{:?}\t{}", token.line, token.column, token.kind, token.text)?;
            }
            Ok(out.trim_end().to_string())
        }

        Commands::Parse { .. } => {
            let ast = match parse_with_config(sql, parser_config) {
                Ok(ast) => ast,
                Err(err) => bail!("{}", err.render(sql)),
            };
            info!(statement = ast.kind(), "parsed");
            Ok(ast.to_string())
        }

        Commands::Compile { .. } => {
            let Some(path) = &cli.schema else {
                bail!("compile needs a schema: pass --schema or set SQLBIND_SCHEMA");
            };
            let schema = load_schema(path)?;
            let ast = match parse_with_config(sql, parser_config) {
                Ok(ast) => ast,
                Err(err) => bail!("{}", err.render(sql)),
            };
            let compiler_config = CompilerConfig::default().with_max_depth(cli.max_depth);
            let query = Compiler::with_config(&schema, compiler_config)
                .compile(ast)
                .with_context(|| format!("failed to compile statement against {}", path.display()))?;
            info!(kind = query.kind(), "compiled");
            Ok(query.to_sql())
        }
    }
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    let schema = Schema::from_json(&json)
        .with_context(|| format!("invalid schema file {}", path.display()))?;
    debug!(tables = schema.tables.len(), "loaded schema");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const SCHEMA: &str = r#"{
        "tables": [
            {
                "name": "dog",
                "columns": [
                    { "name": "id", "primary_key": true, "auto_increment": true },
                    { "name": "cat" }
                ]
            }
        ]
    }"#;

    fn schema_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sqlbind").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_tokens() {
        let out = run(&cli(&["tokens", "x"]), "SELECT 1a").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1:8\tIntLiteral\t1");
        assert_eq!(lines[2], "1:9\tIdentifier\ta");
    }

    #[test]
    fn test_parse_prints_canonical_sql() {
        let out = run(&cli(&["parse", "x"]), "select a from t where a=1").unwrap();
        assert_eq!(out, "SELECT a FROM t WHERE a = 1");
    }

    #[test]
    fn test_parse_error_is_rendered() {
        let err = run(&cli(&["parse", "x"]), "SELECT 1a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected columns or a set function on line 1\nSELECT 1a\n       ^"
        );
    }

    #[test]
    fn test_compile_with_schema_file() {
        let file = schema_file();
        let path = file.path().to_str().unwrap();
        let out = run(
            &cli(&["--schema", path, "compile", "x"]),
            "select * from dog where cat <> 4",
        )
        .unwrap();
        assert_eq!(out, "SELECT * FROM dog WHERE dog.cat <> 4");
    }

    #[test]
    fn test_compile_error_names_the_column() {
        let file = schema_file();
        let path = file.path().to_str().unwrap();
        let err = run(&cli(&["--schema", path, "compile", "x"]), "select * from dog where nope = 1")
            .unwrap_err();
        assert!(format!("{err:#}").contains("Column 'nope' not found in 'dog'"));
    }

    #[test]
    fn test_max_depth_flag() {
        let out = run(&cli(&["--max-depth", "1", "parse", "x"]), "select * from t where a = (1)");
        assert!(out.is_ok());
        let err = run(
            &cli(&["--max-depth", "1", "parse", "x"]),
            "select * from t where a = ((1))",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Statement is nested deeper than 1 levels"));
    }

    #[test]
    fn test_max_connectives_flag() {
        let args = ["--max-connectives", "1", "parse", "x"];
        assert!(run(&cli(&args), "select * from t where a = 1 and b = 2").is_ok());
        let err = run(&cli(&args), "select * from t where a = 1 and b = 2 or c = 3").unwrap_err();
        assert!(err.to_string().starts_with("Statement has more than 1 AND/OR connectives"));
    }
}
