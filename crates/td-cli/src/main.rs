use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use td_clause::{Dialect, Duration, Fragment, explain};
use td_config::{StatementFile, ToolConfig};

mod tracing_init;

use tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "tdsql", about = "TDengine SQL fragment renderer")]
struct Cli {
    /// Path to tdsql.toml; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a statement file to SQL text and positional parameters
    Render {
        /// Path to the statement file
        statement: PathBuf,
        /// Print `{"sql": .., "vars": [..]}` instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Render a statement file with parameters inlined
    Explain {
        /// Path to the statement file
        statement: PathBuf,
    },
    /// Parse a duration token and print its canonical form
    Duration {
        /// Duration token, e.g. `10m`, `500ms`
        token: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (tool_config, base_dir) = match cli.config {
        Some(ref path) => {
            let config_path = path
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
            let tool_config = ToolConfig::load(&config_path)?;
            let base_dir = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            (tool_config, base_dir)
        }
        None => (ToolConfig::default(), PathBuf::from(".")),
    };

    let _guard = init_tracing(&tool_config.logging, &base_dir)?;
    let dialect = tool_config.dialect.resolve();

    match cli.command {
        Commands::Render { statement, json } => {
            let fragment = render(&statement, &dialect)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fragment)?);
            } else {
                println!("{}", fragment.sql);
                for (i, value) in fragment.vars.iter().enumerate() {
                    println!("${} = {}", i + 1, value.to_sql_literal());
                }
            }
        }
        Commands::Explain { statement } => {
            let fragment = render(&statement, &dialect)?;
            println!("{}", explain(&fragment.sql, &fragment.vars));
        }
        Commands::Duration { token } => {
            let duration =
                Duration::parse(&token).map_err(|e| anyhow::anyhow!("duration '{token}': {e}"))?;
            println!("{duration}");
        }
    }

    Ok(())
}

fn render(path: &Path, dialect: &Dialect) -> Result<Fragment> {
    let file = StatementFile::load(path)?;
    tracing::info!(
        domain = "sys",
        statement = %path.display(),
        dialect = Dialect::NAME,
        "rendering statement"
    );
    file.render(dialect)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}
