use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{Result, ScribeError};

use super::{Recognition, LANGUAGES};

/// Everything the engine produced for one run.
#[derive(Debug)]
pub(crate) struct EngineOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs the Tesseract CLI against files on disk.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    binary: String,
    timeout: Duration,
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Whether `<binary> --version` runs successfully within the engine
    /// timeout. A binary that hangs is killed and counts as unavailable.
    pub async fn is_available(&self) -> bool {
        let mut command = Command::new(&self.binary);
        command
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.status()).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(_)) => false,
            Err(_) => {
                warn!(binary = %self.binary, "Version check timed out");
                false
            }
        }
    }

    fn command(&self, image: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg(image)
            .arg("-")
            .arg("-l")
            .arg(LANGUAGES)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Recognizes the text in `image`, printing to stdout.
    ///
    /// Returns only after the process has exited, or has been killed on
    /// timeout.
    pub async fn recognize(&self, image: &Path) -> Result<Recognition> {
        let mut child = self
            .command(image)
            .spawn()
            .map_err(|e| ScribeError::Engine(format!("Failed to start {}: {e}", self.binary)))?;

        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            return Err(ScribeError::Engine("OCR engine pipes unavailable".to_string()));
        };

        let collect = async {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let (read_out, read_err, status) = tokio::join!(
                stdout.read_to_end(&mut out),
                stderr.read_to_end(&mut err),
                child.wait()
            );
            read_out?;
            read_err?;
            Ok::<_, std::io::Error>(EngineOutput {
                status: status?,
                stdout: out,
                stderr: err,
            })
        };
        let collected = tokio::time::timeout(self.timeout, collect).await;

        let output = match collected {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ScribeError::Engine(format!(
                    "Failed to collect OCR output: {e}"
                )))
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "OCR engine timed out, killing it"
                );
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "Failed to kill OCR engine");
                }
                return Err(ScribeError::EngineTimeout(self.timeout.as_secs()));
            }
        };

        info!(status = %output.status, "Tesseract exited");
        select_outcome(&self.binary, output)
    }
}

/// Picks the response for a finished run. Anything on stderr is treated as a
/// failure, even alongside a zero exit status and recognized text.
pub(crate) fn select_outcome(binary: &str, output: EngineOutput) -> Result<Recognition> {
    if !output.stderr.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        warn!(stderr = %stderr, "OCR engine wrote to stderr");
        return Err(ScribeError::EngineReported(stderr));
    }

    if !output.status.success() {
        return Err(ScribeError::Engine(format!(
            "{binary} exited with {}",
            output.status
        )));
    }

    Ok(Recognition::new(output.stdout))
}
