use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl LoadError {
    pub fn fetch(url: &str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn decode(url: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown basemap kind `{0}`")]
pub struct ParseBasemapKindError(pub String);
