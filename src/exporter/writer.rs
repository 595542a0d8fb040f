// file: src/exporter/writer.rs
// description: writes rendered documents into the results directory

use crate::error::{PipelineError, Result};
use crate::models::OutputDocument;
use crate::utils::validation::Validator;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FILE_STEM_CHARS: usize = 30;
const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone)]
pub struct FileWriter {
    output_dir: PathBuf,
}

impl FileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// `{query stem}_{timestamp}.{extension}`, the stem capped at 30 chars
    pub fn timestamped_path(&self, query: &str, extension: &str, now: DateTime<Local>) -> PathBuf {
        let stem = Validator::safe_file_stem(query, Some(FILE_STEM_CHARS));
        self.output_dir.join(format!(
            "{}_{}.{}",
            stem,
            now.format(FILE_TIMESTAMP_FORMAT),
            extension
        ))
    }

    pub fn named_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn write(&self, document: &OutputDocument) -> Result<PathBuf> {
        self.write_text(document.path(), &document.render())
    }

    /// Creates missing parent directories and overwrites any existing file.
    pub fn write_text(&self, path: &Path, content: &str) -> Result<PathBuf> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            debug!("Ensuring directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| PipelineError::file(parent, e))?;
        }

        fs::write(path, content).map_err(|e| PipelineError::file(path, e))?;
        info!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(path.to_path_buf())
    }

    pub fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| PipelineError::file(path, e))
    }
}
