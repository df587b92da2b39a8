// Tripwire - Fault Injection Target
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Whole-file loading.
//!
//! The loader sizes its source by seeking to the end, allocates exactly that
//! many bytes up front and then fills the allocation. Every step reports its
//! own failure; nothing proceeds on a half-populated buffer.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading an input into a [`Buffer`].
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist, cannot be opened for reading, or is not a
    /// regular file.
    #[error("Failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Seeking to the end (or back to the start) of the source failed.
    #[error("Failed to determine input size")]
    SizeQuery {
        #[source]
        source: io::Error,
    },
    /// The reported size cannot be allocated.
    #[error("Failed to allocate {size} bytes for input")]
    Allocation { size: u64 },
    /// The source failed while its content was being read.
    #[error("Failed to read input")]
    Read {
        #[source]
        source: io::Error,
    },
    /// The source ran dry before the reported size was reached.
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Owned copy of an input's full content.
///
/// The length always equals the number of bytes actually read from the
/// source, which in turn equals the size the source reported when it was
/// opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

/// Loads the complete content of the file at `path`.
///
/// The file handle is closed before this function returns, on success and
/// on every error path.
pub fn load_file(path: &Path) -> Result<Buffer> {
    let mut file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let is_file = file
        .metadata()
        .map(|meta| meta.is_file())
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    if !is_file {
        return Err(LoadError::Open {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    debug!("Opened input {:?}", path);
    load_source(&mut file)
}

/// Loads the complete content of any seekable source.
///
/// The size is taken from the end offset; the source is rewound before
/// reading.
pub fn load_source<R: Read + Seek>(reader: &mut R) -> Result<Buffer> {
    let size = query_size(reader)?;
    debug!("Input size: {} bytes", size);

    let len = usize::try_from(size).map_err(|_| LoadError::Allocation { size })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| LoadError::Allocation { size })?;

    reader
        .take(size)
        .read_to_end(&mut data)
        .map_err(|source| LoadError::Read { source })?;

    let actual = data.len() as u64;
    if actual < size {
        warn!("Input ended after {} of {} bytes", actual, size);
        return Err(LoadError::ShortRead {
            expected: size,
            actual,
        });
    }

    Ok(Buffer { data })
}

fn query_size<S: Seek>(reader: &mut S) -> Result<u64> {
    let size = reader
        .seek(SeekFrom::End(0))
        .map_err(|source| LoadError::SizeQuery { source })?;
    reader
        .rewind()
        .map_err(|source| LoadError::SizeQuery { source })?;
    Ok(size)
}
