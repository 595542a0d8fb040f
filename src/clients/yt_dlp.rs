// file: src/clients/yt_dlp.rs
// description: audio download through the external yt-dlp binary
// reference: https://github.com/yt-dlp/yt-dlp#usage-and-options

use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

pub struct AudioDownloader {
    binary: String,
}

impl AudioDownloader {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Downloads the best audio stream as mp3 into `output_dir` and returns the written path.
    pub async fn download_mp3(&self, url: &str, output_dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| PipelineError::file(output_dir, e))?;

        let output_template = output_dir.join("audio.%(ext)s");
        info!("Downloading audio from {}", url);

        let output = Command::new(&self.binary)
            .arg(url)
            .arg("-f")
            .arg("bestaudio/best")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg("192K")
            .arg("--print")
            .arg("after_move:filepath")
            .arg("-o")
            .arg(&output_template)
            .output()
            .await
            .map_err(|e| PipelineError::Process {
                program: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PipelineError::Process {
                program: self.binary.clone(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let printed = stdout.lines().rev().find(|line| !line.trim().is_empty());

        Ok(printed
            .map(|line| PathBuf::from(line.trim()))
            .unwrap_or_else(|| output_dir.join("audio.mp3")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_binary_is_process_error() {
        let temp = TempDir::new().unwrap();
        let downloader = AudioDownloader::new("definitely-not-a-real-yt-dlp-binary");

        let err = downloader
            .download_mp3("https://youtu.be/dQw4w9WgXcQ", temp.path())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Process { .. }));
    }
}
