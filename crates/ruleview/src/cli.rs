use clap::{Args, Parser, Subcommand, ValueEnum};
use ruleview_core::TypeFilter;
use ruleview_export::ExportFormat;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ruleview")]
#[command(version)]
#[command(about = "Inspect which entities a scan rule set matches, as a tree")]
pub struct Cli {
    /// View config file (defaults to <config dir>/ruleview/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the tree of a saved validation result
    Tree {
        /// Validation result JSON ("-" reads stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Resolve include/exclude patterns against a catalog file
    Validate {
        /// Catalog file, one entity path per line
        #[arg(short, long)]
        catalog: PathBuf,

        /// Include pattern (repeatable)
        #[arg(short, long = "include")]
        include: Vec<String>,

        /// Exclude pattern (repeatable)
        #[arg(short, long = "exclude")]
        exclude: Vec<String>,

        /// Data source id recorded in the request
        #[arg(long, default_value = "catalog")]
        data_source: String,

        /// Rule set id recorded in the request (random if omitted)
        #[arg(long)]
        rule_set: Option<Uuid>,

        /// Print the validation result JSON instead of the tree
        #[arg(long)]
        report: bool,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args, Clone)]
pub struct ViewArgs {
    /// Keep nodes whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Node kind to match: all, database, schema, table or column
    #[arg(short, long)]
    pub kind: Option<TypeFilter>,

    /// Keep only included or excluded nodes and their ancestors
    /// (`--matched-only=false` overrides the config)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub matched_only: Option<bool>,

    /// Expand every node instead of the configured depth
    #[arg(long)]
    pub expand_all: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonCompact,
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ExportFormat::Text,
            OutputFormat::Json => ExportFormat::JsonPretty,
            OutputFormat::JsonCompact => ExportFormat::JsonCompact,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}
