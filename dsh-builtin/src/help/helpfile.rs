//! Access to out-of-line help files.
//!
//! Every function opens the file itself and the handle is closed when it goes
//! out of scope, whether the read succeeded or not.

use super::error::HelpError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

pub fn open_helpfile(path: &Path) -> Result<File, HelpError> {
    File::open(path).map_err(|source| HelpError::Open {
        path: path.display().to_string(),
        source,
    })
}

/// Copy the help file byte for byte to `out`.
pub fn stream_helpfile(path: &Path, out: &mut dyn Write) -> Result<(), HelpError> {
    let mut file = open_helpfile(path)?;
    let mut buf = [0u8; 8192];
    let mut total = 0usize;
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(HelpError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        out.write_all(&buf[..n])?;
        total += n;
    }
    debug!("streamed {} bytes from {}", total, path.display());
    Ok(())
}

/// Read the whole help file into an owned buffer. The bytes are kept as
/// they are; help files need not be UTF-8.
pub fn read_helpfile(path: &Path) -> Result<Vec<u8>, HelpError> {
    let mut bytes = Vec::new();
    let result = {
        let mut file = open_helpfile(path)?;
        file.read_to_end(&mut bytes)
    };
    result.map_err(|source| HelpError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(bytes)
}
