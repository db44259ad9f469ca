use std::fmt;
use std::io::{Read, Seek, Write};

use comde::{
    stored::{StoredCompressor, StoredDecompressor},
    ByteCount, Compressor, Decompressor,
};

use crate::error::{Error, Result};

pub mod constants {
    pub const COMPRESSION_UNCOMPRESSED: u8 = 0x00;
}

use self::constants::*;

/// Transform applied to a tensor's payload bytes on the way to and from
/// the file. Only the identity strategy is implemented; other tags survive
/// decoding as `Unknown` and error out when exercised.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Compression {
    Uncompressed,
    Unknown(u8),
}

impl Default for Compression {
    fn default() -> Self {
        Self::Uncompressed
    }
}

impl Compression {
    pub const fn available_variants() -> &'static [&'static str] {
        &["uncompressed"]
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Compression::*;

        match self {
            Uncompressed => write!(f, "uncompressed"),
            Unknown(id) => write!(f, "Unknown(id: {:x})", id),
        }
    }
}

impl fmt::Debug for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Compression {
    pub const fn id(self) -> u8 {
        use Compression::*;

        match self {
            Uncompressed => COMPRESSION_UNCOMPRESSED,
            Unknown(id) => id,
        }
    }

    pub(crate) fn from_id(id: u8) -> Compression {
        match id {
            COMPRESSION_UNCOMPRESSED => Compression::Uncompressed,
            id => Compression::Unknown(id),
        }
    }

    pub fn compress<W: Write + Seek, R: Read>(
        self,
        mut writer: W,
        reader: &mut R,
    ) -> Result<ByteCount> {
        use Compression::*;

        match self {
            Uncompressed => Ok(StoredCompressor.compress(&mut writer, reader)?),
            Unknown(id) => Err(Error::UnsupportedCompressionType(id)),
        }
    }

    pub fn decompress_write<R: Read, W: Write>(self, reader: R, writer: W) -> Result<()> {
        use Compression::*;

        match self {
            Uncompressed => {
                StoredDecompressor.copy(reader, writer)?;
                Ok(())
            }
            Unknown(id) => Err(Error::UnsupportedCompressionType(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        assert_eq!(
            Compression::from_id(COMPRESSION_UNCOMPRESSED),
            Compression::Uncompressed
        );
        assert_eq!(Compression::from_id(0x42), Compression::Unknown(0x42));
        assert_eq!(Compression::Unknown(0x42).id(), 0x42);
    }

    #[test]
    fn uncompressed_is_a_passthrough() {
        let data = b"some tensor payload";

        let mut compressed = Vec::new();
        let mut reader: &[u8] = data;
        let count = Compression::Uncompressed
            .compress(std::io::Cursor::new(&mut compressed), &mut reader)
            .unwrap();
        assert_eq!(compressed, data);
        assert_eq!(count.write, data.len() as u64);

        let mut decompressed = Vec::new();
        Compression::Uncompressed
            .decompress_write(&compressed[..], &mut decompressed)
            .unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn unknown_id_errors_out() {
        let mut out = Vec::new();
        let mut reader: &[u8] = b"x";

        let err = Compression::Unknown(7)
            .compress(std::io::Cursor::new(&mut out), &mut reader)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnsupportedCompressionType(7)));

        let err = Compression::Unknown(7)
            .decompress_write(&b"x"[..], &mut out)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnsupportedCompressionType(7)));
    }
}
