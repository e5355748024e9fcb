//! Failure types of the mirroring pipeline.

use crate::fetch::FetchError;

/// Fatal: the root document could not be obtained. Nothing is written.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("fetch root document {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("root document {url} is not valid JSON")]
    InvalidJson { url: String },
}

/// Why a single resource was not mirrored. Logged and counted, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum MirrorFailure {
    #[error("no file name can be derived from the URL")]
    UnmappableUrl,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("response is empty or not valid JSON")]
    InvalidContent,
    #[error("persist: {0:#}")]
    Persist(anyhow::Error),
}
