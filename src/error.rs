use thiserror::Error;

/// Decode failures. All of them are fatal: the decoder never returns a
/// partial model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("not a GIF: missing 'GIF' signature")]
    NotAGif,

    #[error("truncated stream at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unknown extension label 0x{label:02x} at offset {offset}")]
    UnknownExtensionLabel { label: u8, offset: usize },

    #[error("unexpected block byte 0x{byte:02x} at offset {offset}")]
    UnexpectedBlock { byte: u8, offset: usize },

    #[error("invalid block size at offset {offset}: expected {expected}, got {found}")]
    BadBlockSize {
        offset: usize,
        expected: u8,
        found: u8,
    },

    #[error("missing block terminator at offset {offset}")]
    MissingBlockTerminator { offset: usize },
}
