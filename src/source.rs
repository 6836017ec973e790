use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::SourceError;

/// 5 MiB, the default upload limit.
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Where the log text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Stdin,
}

impl Input {
    pub fn label(&self) -> String {
        match self {
            Input::File(path) => path.display().to_string(),
            Input::Stdin => "<stdin>".to_string(),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(path)
        }
    }
}

/// Decoded log text plus what the report needs to know about it.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub label: String,
    pub size_bytes: u64,
    pub content: String,
}

impl LoadedSource {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Reads and decodes the whole input. `max_bytes` of `None` means no limit.
pub fn read_source(input: &Input, max_bytes: Option<u64>) -> Result<LoadedSource, SourceError> {
    let start_time = Instant::now();
    let label = input.label();

    let loaded = match input {
        Input::File(path) => read_file(path, &label, max_bytes)?,
        Input::Stdin => read_limited(io::stdin().lock(), label, max_bytes)?,
    };

    info!(
        action = "complete",
        component = "source",
        source = %loaded.label,
        size_bytes = loaded.size_bytes,
        duration_ms = start_time.elapsed().as_millis(),
        "Log source loaded"
    );
    Ok(loaded)
}

fn read_file(path: &Path, label: &str, max_bytes: Option<u64>) -> Result<LoadedSource, SourceError> {
    let read_error = |source| SourceError::Read {
        label: label.to_string(),
        source,
    };

    let size = fs::metadata(path).map_err(read_error)?.len();
    if let Some(limit) = max_bytes {
        if size > limit {
            return Err(SourceError::TooLarge {
                label: label.to_string(),
                size,
                limit,
            });
        }
    }

    let file = File::open(path).map_err(read_error)?;
    read_limited(file, label.to_string(), max_bytes)
}

fn read_limited(
    mut reader: impl Read,
    label: String,
    max_bytes: Option<u64>,
) -> Result<LoadedSource, SourceError> {
    let mut bytes = Vec::new();
    let result = match max_bytes {
        // One byte past the limit is enough to tell it was exceeded.
        Some(limit) => reader.take(limit.saturating_add(1)).read_to_end(&mut bytes),
        None => reader.read_to_end(&mut bytes),
    };
    if let Err(source) = result {
        return Err(SourceError::Read { label, source });
    }

    let size = bytes.len() as u64;
    if let Some(limit) = max_bytes {
        if size > limit {
            return Err(SourceError::TooLarge { label, size, limit });
        }
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(LoadedSource {
            label,
            size_bytes: size,
            content,
        }),
        Err(source) => Err(SourceError::Decode { label, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const LINE: &str =
        "177.71.128.21 - - [10/Jul/2018:22:21:28 +0200] \"GET /home HTTP/1.1\" 200 1234\n";

    #[test]
    fn test_input_from_dash_is_stdin() {
        assert_eq!(Input::from(PathBuf::from("-")), Input::Stdin);
        assert_eq!(
            Input::from(PathBuf::from("access.log")),
            Input::File(PathBuf::from("access.log"))
        );
    }

    #[test]
    fn test_read_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(LINE.as_bytes())?;

        let input = Input::File(file.path().to_path_buf());
        let loaded = read_source(&input, Some(DEFAULT_MAX_BYTES))?;
        assert_eq!(loaded.content, LINE);
        assert_eq!(loaded.size_bytes, LINE.len() as u64);
        Ok(())
    }

    #[test]
    fn test_file_over_limit_is_rejected() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(LINE.as_bytes())?;

        let input = Input::File(file.path().to_path_buf());
        let err = read_source(&input, Some(10)).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { size, limit: 10, .. } if size == LINE.len() as u64));

        assert!(read_source(&input, None).is_ok());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let input = Input::File(PathBuf::from("/definitely/not/here.log"));
        let err = read_source(&input, None).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }

    #[test]
    fn test_reader_over_limit() {
        let err = read_limited(Cursor::new(vec![b'a'; 64]), "buf".into(), Some(32)).unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { size: 33, limit: 32, .. }));

        let ok = read_limited(Cursor::new(vec![b'a'; 32]), "buf".into(), Some(32)).unwrap();
        assert_eq!(ok.size_bytes, 32);
    }

    #[test]
    fn test_invalid_utf8() {
        let err = read_limited(Cursor::new(vec![0xff, 0xfe, 0x00]), "buf".into(), None).unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }

    #[test]
    fn test_size_mb() {
        let loaded = LoadedSource {
            label: "x".into(),
            size_bytes: 3 * 1024 * 1024 / 2,
            content: String::new(),
        };
        assert!((loaded.size_mb() - 1.5).abs() < f64::EPSILON);
    }
}
