// file: src/pipeline/analyze.rs
// description: generative analysis of a single transcript file

use crate::clients::TextGenerator;
use crate::config::GenerationSettings;
use crate::error::{PipelineError, Result};
use crate::exporter::FileWriter;
use crate::pipeline::prompts::single_file_prompt;
use crate::utils::validation::Validator;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct AnalyzePipeline {
    writer: FileWriter,
    generation: GenerationSettings,
    focus_topics: Vec<String>,
}

impl AnalyzePipeline {
    pub fn new(writer: FileWriter, generation: GenerationSettings, focus_topics: Vec<String>) -> Self {
        Self {
            writer,
            generation,
            focus_topics,
        }
    }

    /// `{output dir}/{input stem}.md`
    pub fn output_path(&self, input: &Path) -> Result<PathBuf> {
        let stem = input.file_stem().ok_or_else(|| {
            PipelineError::InvalidArgument(format!("Not a file path: {}", input.display()))
        })?;

        Ok(self
            .writer
            .named_path(format!("{}.md", stem.to_string_lossy())))
    }

    /// Writes the raw model response, unformatted.
    pub async fn run(&self, generator: &dyn TextGenerator, input: &Path) -> Result<PathBuf> {
        let output = self.output_path(input)?;
        let transcript = self.writer.read_text(input)?;
        Validator::validate_content_not_empty(&transcript, input)?;

        info!("Analyzing transcript from {}", input.display());
        let prompt = single_file_prompt(&transcript, &self.focus_topics);
        let analysis = generator.generate(&prompt, &self.generation).await?;

        self.writer.write_text(&output, &analysis)
    }
}
