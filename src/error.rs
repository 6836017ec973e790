/// Failures while acquiring log text, before any parsing happens.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {label}")]
    Read {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { label: String, size: u64, limit: u64 },

    #[error("{label} is not valid UTF-8 text")]
    Decode {
        label: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
