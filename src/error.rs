use std::io;

/// Errors surfaced by the darx codec. An `Ok` result stands in for the
/// format's success code; any error aborts the enclosing operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element type tag this codec does not understand.
    #[error("unsupported element type: {0}")]
    UnsupportedElementType(u8),

    /// A compression tag this codec does not understand.
    #[error("unsupported compression type: {0:#04x}")]
    UnsupportedCompressionType(u8),

    /// A malformed archive or tensor: bad magic, a field over its wire
    /// limit, a tensor with no payload, or a short read.
    #[error("invalid structure")]
    InvalidStruct,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Decode-side mapping: a short read is a structural fault of the
    /// file, not an I/O fault of the handle.
    pub(crate) fn from_read(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::InvalidStruct
        } else {
            Error::Io(err)
        }
    }
}
