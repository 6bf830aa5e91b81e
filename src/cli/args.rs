use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lazytok", version, about = "Tokenize text with a lazily loaded tokenizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub global: GlobalArgs,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Tokenizer to load (hub repo id)
    #[arg(long, global = true)]
    pub identifier: Option<String>,
    /// Fail instead of falling back to character encoding
    #[arg(long, global = true)]
    pub fail_fast: bool,
    /// Never touch the network
    #[arg(long, global = true)]
    pub offline: bool,
    /// Give up on the network fetch after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub remote_timeout: Option<u64>,
    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the token ids for TEXT (or stdin)
    Encode {
        text: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Turn token ids back into text
    Decode {
        /// Ids, space or comma separated
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Count tokens in TEXT (or stdin)
    Count { text: Option<String> },
    /// Cut TEXT (or stdin) down to a token budget
    Truncate {
        text: Option<String>,
        /// Budget in tokens [default: budget.max_tokens from lazytok.toml]
        #[arg(long, short)]
        max: Option<usize>,
    },
    /// Load the tokenizer and report how it went
    Status {
        #[arg(long)]
        json: bool,
    },
}
