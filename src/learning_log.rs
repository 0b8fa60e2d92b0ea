//! Append-only file of messages from escalated senders, kept for manual review.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LearningLog {
    path: PathBuf,
}

impl LearningLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[APRENDER] <sender>: <text>` as one line, creating the file if needed.
    pub async fn append(&self, sender_id: &str, text: &str) -> Result<()> {
        let line = format_entry(sender_id, text);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!("Appended learning log entry for {sender_id}");
        Ok(())
    }
}

fn format_entry(sender_id: &str, text: &str) -> String {
    format!("[APRENDER] {sender_id}: {text}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_format() {
        assert_eq!(format_entry("5551", "Hola"), "[APRENDER] 5551: Hola\n");
    }

    #[tokio::test]
    async fn appends_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = LearningLog::new(dir.path().join("aprendizaje.txt"));

        log.append("5551", "primero").await.unwrap();
        log.append("5552", "segundo").await.unwrap();

        let contents = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(
            contents,
            "[APRENDER] 5551: primero\n[APRENDER] 5552: segundo\n"
        );
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = LearningLog::new(dir.path().join("missing").join("log.txt"));
        assert!(log.append("5551", "hola").await.is_err());
    }
}
