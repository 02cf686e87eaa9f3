use crate::core::text::char_len;
use crate::domain::model::GenerationOutput;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::StageMonitor;
use std::path::Path;

/// Runs extract → prepare → generate and folds recoverable failures into the output.
pub struct McqEngine<P: Pipeline> {
    pipeline: P,
    monitor: StageMonitor,
}

impl<P: Pipeline> McqEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: StageMonitor::new(monitor_enabled),
        }
    }

    /// `Err` only for fatal failures; everything after extraction lands in
    /// `GenerationOutput::error` with an empty question list.
    pub async fn run(&self, pdf_path: &Path, num_questions: usize) -> Result<GenerationOutput> {
        tracing::info!("🚀 Processing {}", pdf_path.display());

        let document = self.pipeline.extract(pdf_path).await?;
        self.monitor.log_stage("extract");

        let mut output = GenerationOutput::with_text(document.text.clone());

        let prepared = match self.pipeline.prepare(&document).await {
            Ok(prepared) => prepared,
            Err(e) if !e.is_fatal() => {
                tracing::warn!("⚠️ {} ({})", e, e.recovery_suggestion());
                output.error = Some(e.to_string());
                return Ok(output);
            }
            Err(e) => return Err(e),
        };
        tracing::info!(
            "🧩 Prompt context: {} of {} chars, {} sentence(s)",
            char_len(&prepared.context),
            char_len(&prepared.cleaned),
            prepared.sentence_count
        );
        self.monitor.log_stage("prepare");

        match self.pipeline.generate(&prepared, num_questions).await {
            Ok(questions) => {
                tracing::info!("✅ Generated {} questions", questions.len());
                output.questions = questions;
            }
            Err(e) if !e.is_fatal() => {
                tracing::error!(
                    "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                output.error = Some(e.to_string());
            }
            Err(e) => return Err(e),
        }
        self.monitor.log_stage("generate");

        Ok(output)
    }
}
