//! Dataset loader: one retrieval of a JSON array of records

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

/// Where the dataset lives
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http(s)://` inputs are URLs, anything else is a file path
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

pub const DEFAULT_DATA_PATH: &str = "public/pokemon.json";

/// Dataset retrieval error
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetch and parse the dataset
pub async fn load_dataset(source: &DataSource) -> Result<Vec<Record>, LoadError> {
    let body = match source {
        DataSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DataSource::Url(url) => {
            let response = reqwest::get(url).await?.error_for_status()?;
            response.bytes().await?.to_vec()
        }
    };

    let records = parse_dataset(&body)?;
    tracing::debug!(%source, count = records.len(), "dataset parsed");
    Ok(records)
}

/// Parse a JSON array of records.
///
/// Records without a usable id get their 1-based position in the array.
pub fn parse_dataset(body: &[u8]) -> Result<Vec<Record>, LoadError> {
    let mut records: Vec<Record> = serde_json::from_slice(body)?;
    for (idx, record) in records.iter_mut().enumerate() {
        if record.id.is_blank() {
            record.id = RecordId::Int(idx as i64 + 1);
        }
    }
    Ok(records)
}
