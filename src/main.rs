use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use skillsheet::catalog::{DEFAULT_OUTPUT, DEFAULT_SHEET};
use skillsheet::cli::{self, ExportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillsheet")]
#[command(about = "Export the skill table to an Excel workbook (.xlsx)")]
#[command(long_about = "Skillsheet - skill table to Excel exporter

Writes one worksheet: a header row of column names, then one row per skill.
Running without a command exports the built-in skill table to SkillDataList.xlsx.

COMMANDS:
  export   - Write records to an .xlsx file (default)
  inspect  - Read an .xlsx file back and print its rows

EXAMPLES:
  skillsheet                                   # Built-in table -> SkillDataList.xlsx
  skillsheet export -o out/skills.xlsx -s Skills
  skillsheet export -i skills.yaml -o skills.xlsx
  skillsheet inspect SkillDataList.xlsx --json")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export records to a single-sheet Excel workbook.

The header row is taken from the first record's column names, in order.
Every record must carry the same set of columns.

INPUT:
  Without --input the built-in skill table is exported.
  With --input, records are read from a YAML or JSON file holding a list
  of flat mappings:

  - Skill ID / Name: 01 Strong Slash
    Damage Type: Physical
  - Skill ID / Name: 02 Fireball
    Damage Type: Magic

The file is written atomically; on failure no output is left behind.")]
    /// Export records to an Excel .xlsx file
    Export(ExportArgs),

    /// Read an Excel .xlsx file back and print its rows
    Inspect {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Only show this sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output Excel file path (.xlsx)
    #[arg(short, long, default_value = DEFAULT_OUTPUT, env = "SKILLSHEET_OUTPUT")]
    output: PathBuf,

    /// Worksheet name
    #[arg(short, long, default_value = DEFAULT_SHEET, env = "SKILLSHEET_SHEET")]
    sheet: String,

    /// Records file (YAML or JSON) instead of the built-in skill table
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Show verbose export steps
    #[arg(short, long)]
    verbose: bool,
}

impl From<ExportArgs> for ExportConfig {
    fn from(args: ExportArgs) -> Self {
        ExportConfig {
            output: args.output,
            sheet: args.sheet,
            input: args.input,
            verbose: args.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "skillsheet=debug"
    } else {
        "skillsheet=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Inspect { file, sheet, json }) => {
            init_logging(false);
            cli::inspect(file.clone(), sheet, json)
                .with_context(|| format!("Failed to inspect {}", file.display()))
        }
        None => run_export(cli.export),
    }
}

fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);
    let config = ExportConfig::from(args);
    let output = config.output.clone();
    cli::export(config)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    Ok(())
}
