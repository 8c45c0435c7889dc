use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::DocumentError;


const TIMEOUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source of layout-preserving text, pages separated by form feeds.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, pdf_path: &Path) -> Result<String, DocumentError>;
}

/// Runs poppler's `pdftotext -layout` once per document.
#[derive(Debug, Clone, Default)]
pub struct Pdftotext {
    pub max_pages: Option<usize>,
    pub timeout: Option<Duration>,
}

impl TextExtractor for Pdftotext {
    fn extract_text(&self, pdf_path: &Path) -> Result<String, DocumentError> {
        let file = display_name(pdf_path);
        let failed = |reason: String| DocumentError::ExtractionFailed {
            file: file.clone(),
            reason,
        };

        let mut command = Command::new("pdftotext");
        command
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg("-f")
            .arg("1");
        if let Some(max_pages) = self.max_pages {
            command.arg("-l").arg(max_pages.to_string());
        }
        command.arg(pdf_path).arg("-");

        let output = match self.timeout {
            Some(timeout) => output_with_timeout(command, timeout),
            None => command.output(),
        }
        .map_err(|error| failed(format!("failed to execute pdftotext: {error}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "pdftotext returned non-zero exit status: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn pdftotext_version() -> Option<String> {
    let output = Command::new("pdftotext").arg("-v").output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
}

/// Like [`Command::output`], but kills the child once `timeout` elapses.
fn output_with_timeout(mut command: Command, timeout: Duration) -> io::Result<Output> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_pipe(stdout));
    let stderr_reader = thread::spawn(move || read_pipe(stderr));

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {}s", timeout.as_secs()),
            ));
        }
        thread::sleep(TIMEOUT_POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: stdout_reader.join().unwrap_or_default(),
        stderr: stderr_reader.join().unwrap_or_default(),
    })
}

fn read_pipe<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buffer = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buffer);
    }
    buffer
}
