use std::time::Duration;

use url::Url;

use crate::ApiError;

/// Backend address used for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Applies to `/process`, `/cancel` and `/health`; the event stream has no overall timeout.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    pub fn with_base(base: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base)?,
            ..Self::default()
        })
    }

    /// Resolves `name` below the base path, keeping any path prefix the base carries.
    pub fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

pub(crate) fn parse_base_url(base: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base.trim()).map_err(|err| ApiError::InvalidUrl(format!("{base}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl(format!(
            "{base}: unsupported scheme {other}"
        ))),
    }
}
