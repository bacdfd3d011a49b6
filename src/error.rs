use std::io;

/// The error types.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Please, enter the password. You will use it the next time you open this file.")]
    EmptyPassword,

    #[error("{0} is not implemented")]
    NotImplemented(String),

    #[error("No key file is selected")]
    NoFileSelected,

    #[error("{0} : {1}")]
    KeyFileReadFailed(String, io::Error),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Random key data generation failed: {0}")]
    RandomGenerationFailed(String),

    // Used internally to fall back to the plain content hash of a key file
    #[error("Not a xml key file")]
    NotXmlKeyFile,
    #[error("Only version 2.0 xml key file is supported")]
    UnsupportedXmlKeyFileVersion,

    #[error("{0}")]
    DataError(&'static str),
    #[error("{0}")]
    XmlParsingFailed(#[from] quick_xml::Error),

    #[error("{0}")]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error("{0}")]
    HexDecodeError(#[from] hex::FromHexError),
    #[error("{0}")]
    Base64DecodeError(#[from] base64::DecodeError),
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{0}")]
    RmpEncodeError(#[from] rmp_serde::encode::Error),

    #[error("{0}")]
    Other(String),
}

// UI bridges (tauri commands, ffi) pass errors back as plain messages
impl From<Error> for String {
    fn from(error: Error) -> Self {
        format!("{}", error)
    }
}

impl From<&'static str> for Error {
    fn from(err: &'static str) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
