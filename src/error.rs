use crate::request::Step;

pub type Result<T> = core::result::Result<T, Error>;

pub struct Error {
    pub inner: Box<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            inner: Box::new(kind),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::new(ErrorKind::Reqwest(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::new(ErrorKind::SerdeJson(e))
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::new(ErrorKind::Csv(e))
    }
}

impl From<base64_simd::Error> for Error {
    fn from(e: base64_simd::Error) -> Error {
        Error::new(ErrorKind::Base64(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::StdIo(e))
    }
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Error {
        Error::new(ErrorKind::Figment(e))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("ReqwestError: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("SerdeJsonError: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("CsvError: {0}")]
    Csv(#[from] csv::Error),
    #[error("Base64Error: {0}")]
    Base64(#[from] base64_simd::Error),
    #[error("StdIoError: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("ConfigError: {0}")]
    Figment(#[from] figment::Error),

    /// The server answered a step with a non-2xx status.
    #[error("{step} fail! status {status}")]
    Status {
        step: Step,
        status: reqwest::StatusCode,
    },
    /// A JSON body lacked a field the step depends on.
    #[error("{step} fail! missing field `{field}`")]
    MissingField { step: Step, field: &'static str },
    /// The server understood the request but refused it.
    #[error("{step} fail! {message}")]
    Rejected { step: Step, message: String },

    #[error("invalid AES key: {0}")]
    InvalidKey(String),
    #[error("`{0}` must not be empty")]
    InvalidArgument(&'static str),
    #[error("{0}")]
    Fatal(String),
}
