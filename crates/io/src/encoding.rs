// Byte → text decoding shared by every source

use std::io::Read;
use std::path::Path;

use crate::error::LoadError;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let file = std::fs::File::open(path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;
    read_as_utf8(file).map_err(|e| match e {
        LoadError::Io(msg) => LoadError::Io(format!("{}: {msg}", path.display())),
        other => other,
    })
}

pub fn read_as_utf8<R: Read>(mut reader: R) -> Result<String, LoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::Io(e.to_string()))?;
    Ok(decode(bytes))
}

/// UTF-8 first; on failure fall back to Windows-1252. A leading BOM is dropped.
pub fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
