use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (market_data_gateway.toml). Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where `call` reads its tool parameters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParamSource {
    Json,
    File,
    Stdin,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every tool name
    Tools,

    /// Run one tool and print its JSON answer
    Call {
        /// Tool name (e.g. "get_current_fx_rate")
        tool: String,

        /// Source of the parameter object: json, file, or stdin
        #[arg(long, value_enum, default_value_t = ParamSource::Json)]
        source: ParamSource,

        /// Inline JSON object (when source=json) or path to a JSON file (when source=file)
        #[arg(long, default_value = "{}")]
        input: String,
    },
}
