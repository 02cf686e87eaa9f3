use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use pdf_mcq::domain::model::write_json_line;
use pdf_mcq::utils::{logger, validation::Validate};
use pdf_mcq::{CliConfig, FatalOutput, McqEngine, McqError, McqPipeline};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            return fatal(McqError::InvalidArguments { message });
        }
    };

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let Some(pdf_path) = cli.pdf_path.clone() else {
        return fatal(McqError::MissingPdfPath);
    };

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => return fatal(e),
    };
    if let Err(e) = config.validate() {
        return fatal(McqError::Config {
            message: e.to_string(),
        });
    }
    tracing::debug!("Resolved config: {:?}", config);

    let num_questions = config.question_count(cli.num_questions.as_deref());
    let engine = McqEngine::new_with_monitoring(McqPipeline::from_config(config), cli.monitor);

    match engine.run(Path::new(&pdf_path), num_questions).await {
        Ok(output) => match emit(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("❌ {:#}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => fatal(e),
    }
}

/// Logs the error to stderr, prints `{"error": ...}` to stdout and exits 1.
fn fatal(error: McqError) -> ExitCode {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());

    let output = FatalOutput {
        error: error.to_string(),
    };
    if let Err(e) = emit(&output) {
        tracing::error!("❌ {:#}", e);
    }
    ExitCode::FAILURE
}

/// Writes one line of JSON to stdout.
fn emit<T: Serialize>(document: &T) -> anyhow::Result<()> {
    write_json_line(std::io::stdout().lock(), document).context("writing output document")
}
