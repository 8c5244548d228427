use anyhow::Result;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, process_env, resolve_config};
use crate::input::{BatchFileReader, ConsoleInput, LineQueue};
use crate::session::{DEFAULT_PROMPT, Session, SessionSummary};
use crate::translation::{ChatCompletionClient, JsonTranslator, SentimentResponse};

pub struct ClassifyOptions {
    pub input: Option<String>,
    pub file: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Why a classification run ended abnormally, by phase.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Configuration could not be resolved; no request was attempted.
    #[error(transparent)]
    Config(anyhow::Error),
    /// The batch file could not be read; no request was attempted.
    #[error(transparent)]
    Input(anyhow::Error),
    /// Results could not be written.
    #[error(transparent)]
    Session(anyhow::Error),
}

impl ClassifyError {
    pub const fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Config(_) => exitcode::CONFIG,
            Self::Input(_) => exitcode::NOINPUT,
            Self::Session(_) => exitcode::IOERR,
        }
    }
}

/// Resolves configuration, then runs a session until input ends or `cancel` fires.
///
/// Per-line translation failures are reported inside the session and never
/// surface here.
pub async fn run_classify(
    options: ClassifyOptions,
    cancel: CancellationToken,
) -> Result<SessionSummary, ClassifyError> {
    let config = load_config(&options).map_err(ClassifyError::Config)?;

    let batch = options
        .file
        .as_deref()
        .map(BatchFileReader::read_lines)
        .transpose()
        .map_err(ClassifyError::Input)?;

    info!(
        provider = %config.provider_name,
        model = %config.model,
        endpoint = %config.endpoint,
        "starting session"
    );

    let translator = JsonTranslator::new(ChatCompletionClient::new(config.client_settings()))
        .with_max_repair_attempts(config.max_repair_attempts);
    let session = Session::new(translator, cancel);

    let summary = match batch {
        Some(lines) => {
            let mut source = ConsoleInput::Batch(LineQueue::new(lines));
            session.run_console::<SentimentResponse>(&mut source).await
        }
        None => {
            session
                .run::<SentimentResponse>(DEFAULT_PROMPT, options.input)
                .await
        }
    };

    summary.map_err(ClassifyError::Session)
}

fn load_config(options: &ClassifyOptions) -> Result<ResolvedConfig> {
    let config_file = ConfigManager::new()?.load()?;
    let resolve_options = ResolveOptions {
        provider: options.provider.clone(),
        model: options.model.clone(),
    };
    Ok(resolve_config(&resolve_options, &config_file, &process_env)?)
}
