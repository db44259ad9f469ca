use std::io::{Read, Seek, SeekFrom};

use crate::{
    de::{read_header, DeserializeOwned, TypeInfo},
    error::{Error, Result},
    header::MAGIC_BYTES,
    record::Tensor,
};

use super::Archive;

impl Archive {
    /// Read a whole archive from an open seekable handle.
    ///
    /// Multi-byte fields are interpreted in the byte order recorded by the
    /// writer, so archives produced on a foreign-endian machine load
    /// correctly. Any per-tensor decode failure aborts the load and
    /// surfaces that tensor's error.
    pub fn load_from<R: Read + Seek>(reader: &mut R) -> Result<Archive> {
        let header = read_header(reader)?;
        let info = TypeInfo::new(&header);

        let mut offsets = Vec::with_capacity(header.tensor_count as usize);
        for _ in 0..header.tensor_count {
            offsets.push(info.read_offset(reader)?);
        }
        tracing::debug!(?offsets, "tensor index table");

        let metadata_size = info.read_u16(reader)?;
        let mut metadata = vec![0u8; metadata_size as usize];
        reader.read_exact(&mut metadata).map_err(Error::from_read)?;

        let mut tensors = Vec::with_capacity(offsets.len());
        for offset in offsets {
            reader.seek(SeekFrom::Start(offset))?;
            tensors.push(Tensor::deserialize_owned(reader, &info)?);
        }

        Ok(Archive {
            valid: true,
            stored_big_endian: header.big_endian,
            metadata,
            tensors,
        })
    }
}

/// Report whether the next four bytes are the darx magic, leaving the
/// read position exactly where it was.
pub fn is_darx<R: Read + Seek>(reader: &mut R) -> std::io::Result<bool> {
    let pos = reader.stream_position()?;

    let mut magic = [0u8; 4];
    let matched = match reader.read_exact(&mut magic) {
        Ok(()) => &magic == MAGIC_BYTES,
        Err(ref err) if err.kind() == std::io::ErrorKind::UnexpectedEof => false,
        Err(err) => {
            reader.seek(SeekFrom::Start(pos))?;
            return Err(err);
        }
    };

    reader.seek(SeekFrom::Start(pos))?;
    Ok(matched)
}
