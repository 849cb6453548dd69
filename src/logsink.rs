use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only text log of received payloads. Writers are serialized so lines
/// never interleave.
pub struct LogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogSink {
    /// Open (creating if needed) the log file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line holding the compact JSON payload.
    pub async fn append(&self, payload: &Value) -> std::io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string();
        let line = format_line(&timestamp, payload);

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

pub fn format_line(timestamp: &str, payload: &Value) -> String {
    format!("{timestamp} - Received JSON: {payload}\n")
}
