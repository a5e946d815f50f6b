use thiserror::Error;

/// Result type local to pstatus-core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the codec layer. These never describe the *status* being
/// carried; they describe why bytes could not become a status (or a payload).
#[derive(Debug, Error)]
pub enum Error {
    #[error("short frame: need {need} bytes, got {got}")]
    ShortFrame { need: usize, got: usize },

    #[error("bad frame magic {0:#010x}")]
    BadMagic(u32),

    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u16),

    #[error("bad frame flags {flags:#04x} (reserved {reserved:#04x}): {reason}")]
    BadFlags {
        flags: u8,
        reserved: u8,
        reason: &'static str,
    },

    #[error("frame checksum mismatch")]
    ChecksumMismatch,

    #[error("frame length mismatch: header declares {declared} bytes, body has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("{field} is {len} bytes, limit is {max}")]
    TooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(&'static str),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload type mismatch: expected '{expected}', found '{found}'")]
    PayloadTypeMismatch { expected: String, found: String },

    #[error("payload '{type_url}' failed to decode: {reason}")]
    PayloadDecode { type_url: String, reason: String },

    #[error("unknown status code {0}")]
    UnknownCode(i32),
}
