use clap::Parser;
use tokio_util::sync::CancellationToken;

use sentiment_cli::cli::Args;
use sentiment_cli::cli::commands::classify::{self, ClassifyOptions};
use sentiment_cli::logging;
use sentiment_cli::output::{self, OutputConfig};
use sentiment_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    logging::init(args.verbose);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let options = ClassifyOptions {
        input: args.input,
        file: args.file,
        provider: args.provider,
        model: args.model,
    };

    // Exit directly: a stdin read may still be parked on a blocking thread
    // after cancellation, and runtime shutdown would wait for it.
    match classify::run_classify(options, cancel).await {
        Ok(_) => std::process::exit(exitcode::OK),
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            std::process::exit(e.exit_code());
        }
    }
}
