//! csvtable - inspect and edit CSV tables from the command line

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use csvtable::config::{Config, OutputFormat};
use csvtable::model::cell;
use csvtable::output::{render_to_stdout, OutputFactory};
use csvtable::{split_line, Table};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Csv,
    Json,
    Terminal,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Terminal => OutputFormat::Terminal,
        }
    }
}

/// How a cell value is read or written
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CellKind {
    String,
    Int,
    Float,
    Bool,
}

/// Inspect and edit CSV tables
#[derive(Parser, Debug)]
#[command(name = "csvtable")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Field separator
    #[arg(short, long, global = true, default_value = ",")]
    separator: String,

    /// Comment marker used with --skip-comments
    #[arg(long, global = true, default_value_t = '#')]
    comment: char,

    /// Skip rows starting with the comment marker
    #[arg(long, global = true)]
    skip_comments: bool,

    /// Split lines verbatim, treating quotes as ordinary characters
    #[arg(long, global = true)]
    no_quotes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a table
    Show {
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: CliOutputFormat,
    },

    /// Print one cell
    Get {
        file: PathBuf,
        row: usize,
        col: usize,

        /// Read the cell as this type
        #[arg(long = "as", value_enum, default_value = "string")]
        kind: CellKind,
    },

    /// Set one cell and save, growing the table if needed
    Set {
        file: PathBuf,
        row: usize,
        col: usize,
        value: String,

        /// Store the value as this type
        #[arg(long = "as", value_enum, default_value = "string")]
        kind: CellKind,

        /// Write to this file instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-encode a table
    Convert {
        file: PathBuf,

        /// Target format
        #[arg(long, value_enum, default_value = "json")]
        to: CliOutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Separator for delimited output (defaults to --separator)
        #[arg(long)]
        out_separator: Option<String>,
    },

    /// Split one line on the separator, ignoring quotes
    Split { line: String },
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::default()
        .with_separator(cli.separator.clone())
        .with_quoting(!cli.no_quotes)
        .with_comment(cli.comment)
        .with_skip_comments(cli.skip_comments);

    match cli.command {
        Command::Show { file, format } => {
            let table = load(&file, config.with_output_format(format.into()))?;
            render_to_stdout(&table)?;
        }
        Command::Get {
            file,
            row,
            col,
            kind,
        } => {
            let mut table = load(&file, config)?;
            table.try_ensure(row, col)?;
            let value = match kind {
                CellKind::String => table.get_string(row, col).to_string(),
                CellKind::Int => table.get_int(row, col).to_string(),
                CellKind::Float => table.get_float(row, col).to_string(),
                CellKind::Bool => table.get_bool(row, col).to_string(),
            };
            println!("{}", value);
        }
        Command::Set {
            file,
            row,
            col,
            value,
            kind,
            output,
        } => {
            let mut table = load(&file, config)?;
            table.try_ensure(row, col)?;
            match kind {
                CellKind::String => table.set_string(row, col, value),
                CellKind::Int => table.set_int(row, col, cell::to_int(&value)),
                CellKind::Float => table.set_float(row, col, cell::to_float(&value)),
                CellKind::Bool => table.set_bool(row, col, cell::to_bool(&value)),
            }

            let target = output.as_deref().unwrap_or(&file);
            table
                .save_file_to(target)
                .with_context(|| format!("Failed to save {}", target.display()))?;
        }
        Command::Convert {
            file,
            to,
            output,
            out_separator,
        } => {
            let mut table = load(&file, config.with_output_format(to.into()))?;
            if let Some(separator) = out_separator {
                table.config_mut().separator = separator;
            }
            match output {
                Some(path) => write_to_file(&table, &path)?,
                None => render_to_stdout(&table)?,
            }
        }
        Command::Split { line } => {
            for field in split_line(&line, &cli.separator) {
                println!("{}", field);
            }
        }
    }

    Ok(())
}

fn load(path: &Path, config: Config) -> Result<Table> {
    Table::from_path(path, config)
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn write_to_file(table: &Table, path: &Path) -> Result<()> {
    let format = table.config().output_format;
    if format == OutputFormat::Csv {
        return table
            .save_file_to(path)
            .with_context(|| format!("Failed to save {}", path.display()));
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    OutputFactory::create(format, table.config())
        .render(table, &mut writer)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
