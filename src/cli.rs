use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pacer-docket",
    version,
    about = "PACER docket link extraction and query date chunking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    SplitQuery(SplitQueryArgs),
    Extract(ExtractArgs),
    Godls(GodlsArgs),
    Url(UrlArgs),
    Hours(HoursArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    #[arg(long, default_value = "goDLS")]
    pub godls_name: String,

    #[arg(long, value_delimiter = ',')]
    pub godls_args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SplitQueryArgs {
    #[arg(long)]
    pub config: PathBuf,

    #[arg(
        long = "date-pair",
        default_values_t = [
            "filed_from:filed_to".to_string(),
            "terminated_from:terminated_to".to_string(),
            "last_entry_from:last_entry_to".to_string(),
        ]
    )]
    pub date_pairs: Vec<String>,

    #[arg(long, default_value_t = 180)]
    pub max_gap_days: i64,

    #[arg(long, default_value_t = 31)]
    pub chunk_size_days: i64,

    #[arg(long)]
    pub today: Option<String>,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub html: PathBuf,

    #[arg(long)]
    pub table_selector: Option<String>,

    #[arg(long, default_value_t = false)]
    pub include_attachments: bool,

    #[arg(long = "want")]
    pub wants: Vec<String>,

    #[arg(long)]
    pub wanted_json: Option<PathBuf>,

    #[arg(long)]
    pub text_filter: Option<String>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub manifest: Option<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GodlsArgs {
    #[command(subcommand)]
    pub action: GodlsAction,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GodlsAction {
    Decode {
        raw: String,
    },
    Encode {
        #[arg(long = "arg")]
        args: Vec<String>,

        #[arg(long = "override")]
        overrides: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct UrlArgs {
    #[arg(long)]
    pub court: String,

    #[arg(long)]
    pub page: String,
}

#[derive(Args, Debug, Clone)]
pub struct HoursArgs {
    #[arg(long, default_value_t = 20)]
    pub start: u32,

    #[arg(long, default_value_t = 4)]
    pub end: u32,
}
