//! File access with an encoding ladder on read and parent-directory creation
//! on write.

use std::path::Path;

use tokio::fs;

/// Encodings attempted on read, in priority order. Named in the aggregate
/// error when the file cannot be read at all.
pub const READ_ENCODINGS: [&str; 3] = ["utf-8", "latin1", "utf-8 (lossy)"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub content: String,
    pub encoding_used: &'static str,
}

/// Read a file, trying UTF-8 strict first and falling back down the ladder.
/// Either the whole content decodes or an error is returned; there is no
/// partial result.
pub async fn read_file(path: &Path) -> Result<DecodedFile, String> {
    let bytes = fs::read(path).await.map_err(|e| {
        format!(
            "Failed to read file '{}' with all attempted encodings: {} ({e})",
            path.display(),
            READ_ENCODINGS.join(", ")
        )
    })?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> DecodedFile {
    match String::from_utf8(bytes) {
        Ok(content) => DecodedFile {
            content,
            encoding_used: "utf-8",
        },
        // Latin-1 assigns every byte value, so this leg cannot fail and the
        // final lossy UTF-8 attempt of the ladder is unreachable in practice.
        Err(err) => DecodedFile {
            content: encoding_rs::mem::decode_latin1(err.as_bytes()).into_owned(),
            encoding_used: "latin1",
        },
    }
}

/// Write the full content, creating any missing parent directories first.
/// Overwrites (truncates) an existing file.
pub async fn write_file(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                format!("Failed to create directory '{}': {e}", parent.display())
            })?;
        }
    }

    fs::write(path, content)
        .await
        .map_err(|e| format!("Failed to write file '{}': {e}", path.display()))
}
