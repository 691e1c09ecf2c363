// Input collaborators: turn files on disk into Documents.

pub mod pdf;
pub mod wos;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

/// Read a text file, decoding as UTF-8 and falling back to Latin-1.
///
/// Latin-1 maps every byte to a char, so the fallback cannot fail; exports
/// saved with a legacy code page still yield their ASCII field labels.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "File is not valid UTF-8, decoding as Latin-1");
            Ok(decode_latin1(e.as_bytes()))
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
