use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::key_file_selector::KeyFileOptions;
use crate::util;

/// Content of a key file read from disk
pub struct LoadedKeyFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// A key file read started for one selection attempt
///
/// Each attempt gets a new token. A read whose token is no longer the latest
/// one when it completes is discarded.
pub struct PendingKeyFileRead {
    token: u64,
    path: Option<PathBuf>,
}

pub struct KeyFileReadResult {
    pub(crate) token: u64,
    pub(crate) result: Result<LoadedKeyFile>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyFileReadOutcome {
    Applied(KeyFileOptions),
    // A newer selection was started while this read was pending
    Discarded,
}

impl PendingKeyFileRead {
    pub(crate) fn new(token: u64, path: Option<PathBuf>) -> Self {
        Self { token, path }
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub async fn read(self) -> KeyFileReadResult {
        let result = match &self.path {
            Some(p) => read_key_file(p).await,
            None => Err(Error::NoFileSelected),
        };
        KeyFileReadResult {
            token: self.token,
            result,
        }
    }
}

impl KeyFileReadResult {
    pub fn token(&self) -> u64 {
        self.token
    }
}

async fn read_key_file(path: &Path) -> Result<LoadedKeyFile> {
    let path_str = path.to_string_lossy().to_string();
    debug!("Reading key file {}", &path_str);
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::KeyFileReadFailed(format!("Reading key file {} failed", &path_str), e))?;
    let file_name = util::file_name(&path_str).ok_or(Error::NoFileSelected)?;
    Ok(LoadedKeyFile { file_name, data })
}

#[derive(Default, Debug)]
pub(crate) struct KeyFileReadTracker {
    latest: u64,
}

impl KeyFileReadTracker {
    pub(crate) fn next_token(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub(crate) fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}
