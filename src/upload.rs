//! Model file upload
//!
//! POSTs a picked model file to a configured endpoint as multipart form
//! data. The staging flow treats this as fire-and-forget: success and
//! failure are logged, nothing retries, nothing blocks the session.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};

const FIELD_NAME: &str = "file";
const CONTENT_TYPE: &str = "model/vnd.fbx";
const BOUNDARY: &str = "----mainstage-model-upload";

#[derive(Debug)]
pub enum UploadError {
    Io(io::Error),
    Http(Box<ureq::Error>),
    /// The path has no usable file name to label the form part with
    BadFileName,
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Io(e) => write!(f, "upload read error: {}", e),
            UploadError::Http(e) => write!(f, "upload request failed: {}", e),
            UploadError::BadFileName => write!(f, "upload path has no file name"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<io::Error> for UploadError {
    fn from(e: io::Error) -> Self {
        UploadError::Io(e)
    }
}

impl From<ureq::Error> for UploadError {
    fn from(e: ureq::Error) -> Self {
        UploadError::Http(Box::new(e))
    }
}

/// Uploads model files to one endpoint
pub struct Uploader {
    endpoint: String,
    agent: ureq::Agent,
}

impl Uploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
        }
    }

    /// POST the file as a `file` form field; returns the response body
    pub fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(UploadError::BadFileName)?;
        let bytes = fs::read(path)?;
        let body = multipart_body(file_name, &bytes);

        let response = self
            .agent
            .post(&self.endpoint)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .send_bytes(&body)?;
        Ok(response.into_string()?)
    }

    /// Fire-and-forget variant: outcome is logged, errors are swallowed
    pub fn upload_and_log(&self, path: &Path) {
        match self.upload(path) {
            Ok(body) => info!("uploaded {}: {}", path.display(), body),
            Err(err) => warn!("upload of {} failed: {}", path.display(), err),
        }
    }
}

fn multipart_body(file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let header = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
         Content-Type: {ctype}\r\n\r\n",
        boundary = BOUNDARY,
        field = FIELD_NAME,
        name = file_name,
        ctype = CONTENT_TYPE,
    );
    let footer = format!("\r\n--{}--\r\n", BOUNDARY);

    let mut body = Vec::with_capacity(header.len() + bytes.len() + footer.len());
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(footer.as_bytes());
    body
}
