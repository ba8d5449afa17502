use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("detector failure: {0}")]
    Detector(#[source] BoxedError),

    #[error("video decode failure: {0}")]
    Decode(#[source] BoxedError),
}

impl Error {
    #[inline]
    pub fn detector(err: impl Into<BoxedError>) -> Self {
        Error::Detector(err.into())
    }

    #[inline]
    pub fn decode(err: impl Into<BoxedError>) -> Self {
        Error::Decode(err.into())
    }
}
