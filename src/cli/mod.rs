// src/cli/mod.rs — CLI definition (clap derive)

pub mod run;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ontodash", about = "Ontology validation dashboard", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// API base URL (overrides ONTODASH_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format of one-shot commands
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Dashboard HTML fragments
    Html,
    /// Plain text, as shown in the terminal dashboard
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the terminal dashboard (default). With `--format html`, print a
    /// snapshot of the full page instead.
    Dashboard {
        /// Tab to open: home, query, cqs, reasoner, metrics, about
        #[arg(long)]
        tab: Option<String>,
    },
    /// Ask a question and print the answer with its citations
    Query {
        /// Question text
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },
    /// Run competency questions
    Cq {
        /// CQ number (1-10)
        #[arg(required_unless_present_any = ["all", "batch"])]
        number: Option<u8>,
        /// Run CQ1..CQ10 one after another
        #[arg(long, conflicts_with_all = ["number", "batch"])]
        all: bool,
        /// Run every CQ server-side in a single request
        #[arg(long, conflicts_with = "number")]
        batch: bool,
    },
    /// Run a reasoner operation: classify, consistency, realize, materialize, all
    Reasoner {
        op: String,
    },
    /// Show ontology, RAG, agent and reasoner metrics
    Metrics,
    /// Check API health
    Health,
}
