//! UDPipe analyzer backends
//!
//! Two ways to reach UDPipe: its REST service (`/process`) or the `udpipe`
//! command-line binary with a local model file. Both are bootstrapped
//! explicitly and then passed to the annotation stage.

use crate::conllu::ConlluDocument;
use crate::pipeline::{AnalyzerError, ConlluAnalyzer};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use url::Url;

/// Response body of the UDPipe REST `/process` endpoint
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    result: String,
}

/// UDPipe reached over its REST API
#[derive(Debug, Clone)]
pub struct UdpipeServiceAnalyzer {
    client: Client,
    process_url: Url,
    model: String,
}

impl UdpipeServiceAnalyzer {
    /// Prepares a client for the service at `endpoint`
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the API, e.g. `https://lindat.mff.cuni.cz/services/udpipe/api/`
    /// * `model` - Model name passed with every request
    /// * `timeout` - Per-request timeout, `None` for none
    pub fn bootstrap(endpoint: &str, model: &str, timeout: Option<Duration>) -> Result<Self, AnalyzerError> {
        let mut base = Url::parse(endpoint)
            .map_err(|e| AnalyzerError::Bootstrap(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let process_url = base
            .join("process")
            .map_err(|e| AnalyzerError::Bootstrap(e.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;

        tracing::info!("Using UDPipe service at {} with model '{}'", process_url, model);
        Ok(Self {
            client,
            process_url,
            model: model.to_string(),
        })
    }

    fn process(&self, text: &str) -> Result<ConlluDocument, AnalyzerError> {
        let form = [
            ("model", self.model.as_str()),
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
            ("data", text),
        ];

        let response = self.client.post(self.process_url.clone()).form(&form).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::Service {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let body: ProcessResponse = response.json()?;
        Ok(ConlluDocument::parse(&body.result)?)
    }
}

impl ConlluAnalyzer for UdpipeServiceAnalyzer {
    fn analyze(&self, texts: &[String]) -> Result<Vec<ConlluDocument>, AnalyzerError> {
        texts.iter().map(|text| self.process(text)).collect()
    }
}

/// UDPipe run as a local process
#[derive(Debug, Clone)]
pub struct UdpipeCliAnalyzer {
    binary: PathBuf,
    model: PathBuf,
}

impl UdpipeCliAnalyzer {
    /// Checks that the model file exists
    ///
    /// The binary is only looked up when the first text is analyzed.
    pub fn bootstrap(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Result<Self, AnalyzerError> {
        let model = model.into();
        if !model.is_file() {
            return Err(AnalyzerError::Bootstrap(format!(
                "model file not found: {}",
                model.display()
            )));
        }
        Ok(Self {
            binary: binary.into(),
            model,
        })
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    fn process(&self, text: &str) -> Result<ConlluDocument, AnalyzerError> {
        let mut child = Command::new(&self.binary)
            .args(["--tokenize", "--tag", "--parse"])
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is written from a helper thread while stdout drains
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AnalyzerError::Process("stdin not captured".to_string()))?;
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| AnalyzerError::Process("stdin writer panicked".to_string()))??;

        if !output.status.success() {
            return Err(AnalyzerError::Process(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let conllu = String::from_utf8_lossy(&output.stdout);
        Ok(ConlluDocument::parse(&conllu)?)
    }
}

impl ConlluAnalyzer for UdpipeCliAnalyzer {
    fn analyze(&self, texts: &[String]) -> Result<Vec<ConlluDocument>, AnalyzerError> {
        texts.iter().map(|text| self.process(text)).collect()
    }
}
