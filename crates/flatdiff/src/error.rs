use flatdiff_codec::CodecError;
use flatdiff_diff::DiffError;
use flatdiff_patch::PatchError;
use flatdiff_types::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DiffError> for Error {
    fn from(err: DiffError) -> Self {
        match err {
            DiffError::Options(e) => Self::Config(e),
            DiffError::Serialization(e) => Self::Serialization(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
