use std::time::Duration;
use serde_json::Value;
use thiserror::Error;
use Common::portal::utils::detection::DetectionReport;
use Common::utils::log_entry::network::NetworkEntry;
use crate::utils::config::Config;
use crate::utils::logging::*;

//The backend contract: one multipart POST per submission, fixed port.
pub const DETECTION_PORT: u16 = 8000;
pub const DETECTION_FILE_FIELD: &str = "file";

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("No image selected")]
    MissingImage,
    #[error("Invalid detection backend address")]
    InvalidHost,
    #[error("{0}")]
    Transport(String),
    #[error("Server responded with status: {0}")]
    BadStatus(u16),
    #[error("{0}")]
    Parse(String),
}

impl DetectError {
    //The message shown on the page. Failures past the input guard read as
    //connection failures, with the status line kept verbatim so the numeric
    //code always reaches the user.
    pub fn user_message(&self) -> String {
        match self {
            DetectError::MissingImage => "No image selected.".to_string(),
            DetectError::InvalidHost => "Connection failed: Invalid server address.".to_string(),
            DetectError::Transport(_) => "Connection failed: Unable to reach the detection backend. Please check the server address and ensure the backend is running.".to_string(),
            DetectError::BadStatus(status) => format!("Connection failed: Server responded with status: {status}"),
            DetectError::Parse(_) => "Connection failed: Invalid response from the detection backend.".to_string(),
        }
    }

    pub fn log_entry(&self, host: &str) -> Option<LogEntry> {
        let entry = match self {
            DetectError::MissingImage => return None,
            DetectError::InvalidHost => NetworkEntry::InvalidHostError(host.to_string()),
            DetectError::Transport(reason) => NetworkEntry::EstablishConnectionError(host.to_string(), reason.clone()),
            DetectError::BadStatus(status) => NetworkEntry::BadStatusError(host.to_string(), *status),
            DetectError::Parse(reason) => NetworkEntry::ResponseParseError(reason.clone()),
        };
        Some(error_entry!(entry))
    }
}

pub struct DetectionClient {
    client: reqwest::Client,
    port: u16,
    timeout: Duration,
}

impl DetectionClient {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(DETECTION_PORT, Duration::from_secs(config.detection_timeout))
    }

    pub fn with_settings(port: u16, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            port,
            timeout,
        }
    }

    pub async fn detect(&self, host: &str, file_name: &str, image: Vec<u8>) -> Result<DetectionReport, DetectError> {
        let host = Self::validate_host(host)?;
        let url = format!("http://{host}:{port}/detect", port = self.port);
        let mime_type = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = reqwest::multipart::Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(mime_type.essence_str())
            .map_err(|err| DetectError::Transport(err.to_string()))?;
        let form = reqwest::multipart::Form::new().part(DETECTION_FILE_FIELD, part);
        let response = self.client.post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| DetectError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DetectError::BadStatus(status.as_u16()));
        }
        let body = response.json::<Value>().await
            .map_err(|err| DetectError::Parse(err.to_string()))?;
        Ok(DetectionReport::from_value(body))
    }

    //The port is fixed, so a host carrying a scheme, path or port of its own
    //would silently change the target. Reject those up front; everything
    //else is left to the transport layer to refuse.
    pub fn validate_host(host: &str) -> Result<&str, DetectError> {
        let host = host.trim();
        let malformed = host.is_empty()
            || host.contains(char::is_whitespace)
            || host.contains('/')
            || host.contains(':');
        if malformed {
            return Err(DetectError::InvalidHost);
        }
        Ok(host)
    }
}
