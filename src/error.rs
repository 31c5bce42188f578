//! Error types shared by every setup and cluster step

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by hellok8s.
///
/// Every variant is fatal to the run; the binary reports it and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// No kubeconfig path was given and no home directory could be resolved
    #[error("no kubeconfig path available: pass --kubeconfig or set HELLOK8S_KUBECONFIG")]
    MissingKubeconfig,

    /// The kubeconfig file could not be read, parsed or turned into a client config
    #[error("failed to load kubeconfig {path}: {source}")]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: kube::config::KubeconfigError,
    },

    /// The HTTP client could not be built from the resolved config
    #[error("failed to build Kubernetes client: {0}")]
    Client(#[source] kube::Error),

    /// The API server rejected a request or could not be reached
    #[error("Kubernetes API request failed: {0}")]
    Api(#[source] kube::Error),

    /// The manifest could not be converted to its wire representation
    #[error("failed to encode manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Console read or write failed
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status code returned by the API server, if the error came from it
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(kube::Error::Api(response)) => Some(response.code),
            _ => None,
        }
    }

    /// True when the API server refused a create because the name is taken
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
