use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "sentiment")]
#[command(about = "Classify the sentiment of text with a language model")]
#[command(version)]
pub struct Args {
    /// Text to classify (starts an interactive session if omitted)
    pub input: Option<String>,

    /// File with one text per line to classify
    #[arg(short = 'f', long, conflicts_with = "input")]
    pub file: Option<String>,

    /// Provider name from the config file (default: openai)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Suppress the session banner and spinner
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
