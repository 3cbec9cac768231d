use thiserror::Error;

/// Convenient result alias for the Pokédex library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant owns plain data so the error can be cloned and handed to
/// each caller awaiting a shared catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The upstream API answered with a non-success status.
    #[error("HTTP error! Status: {status} for URL: {url}")]
    Transport { status: u16, url: String },

    /// The response body was not JSON or did not have the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The request could not be completed at all (DNS, connect, reset).
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Raised when a string does not name one of the known habitats.
    #[error("unknown habitat: {name}{}", format_known(.known))]
    UnknownHabitat {
        name: String,
        known: Vec<&'static str>,
    },
}

impl Error {
    /// Classify a `reqwest` failure for `url` into a transport-level variant.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Error::Transport {
                status: status.as_u16(),
                url: url.to_string(),
            };
        }

        if err.is_decode() {
            return Error::Decode {
                url: url.to_string(),
                message: err.to_string(),
            };
        }

        Error::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP status carried by a [`Error::Transport`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_known(known: &[&'static str]) -> String {
    if known.is_empty() {
        String::new()
    } else {
        format!(". Expected one of: {}", known.join(", "))
    }
}
