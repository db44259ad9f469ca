use std::io::{Read, Seek};

use byteorder::{BigEndian, LittleEndian, NativeEndian, ReadBytesExt};

use crate::{
    compression::Compression,
    element::{
        constants::{TYPE_CUSTOM, TYPE_MIXED},
        ElementType, ScalarKind,
    },
    endian,
    error::{Error, Result},
    header::{DarxHeader, ENDIAN_MARK, MAGIC_BYTES},
    record::Tensor,
};

/// Decode context derived from a file's header: the byte order the file
/// was written in and the recorded field widths.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeInfo {
    pub(crate) big_endian: bool,
    pub(crate) int_size: u8,
    pub(crate) long_size: u8,
}

impl TypeInfo {
    pub(crate) fn new(header: &DarxHeader) -> TypeInfo {
        TypeInfo {
            big_endian: header.big_endian,
            int_size: header.int_size,
            long_size: header.long_size,
        }
    }

    #[inline(always)]
    pub(crate) fn needs_swap(&self) -> bool {
        self.big_endian != endian::native_is_big_endian()
    }

    pub(crate) fn read_u16<R: Read>(&self, reader: &mut R) -> Result<u16> {
        let value = reader.read_u16::<NativeEndian>().map_err(Error::from_read)?;
        Ok(if self.needs_swap() {
            endian::swap_u16(value)
        } else {
            value
        })
    }

    pub(crate) fn read_u32<R: Read>(&self, reader: &mut R) -> Result<u32> {
        let value = reader.read_u32::<NativeEndian>().map_err(Error::from_read)?;
        Ok(if self.needs_swap() {
            endian::swap_u32(value)
        } else {
            value
        })
    }

    /// Read an unsigned field of the given recorded width in the stored
    /// byte order. Widths are validated against 1..=8 when the header is
    /// read.
    pub(crate) fn read_uint<R: Read>(&self, reader: &mut R, width: u8) -> Result<u64> {
        let result = if self.big_endian {
            reader.read_uint::<BigEndian>(width as usize)
        } else {
            reader.read_uint::<LittleEndian>(width as usize)
        };

        result.map_err(Error::from_read)
    }

    /// A dimension length: `int_size` bytes on the wire, `u32` in the
    /// model.
    pub(crate) fn read_dim<R: Read>(&self, reader: &mut R) -> Result<u32> {
        let value = self.read_uint(reader, self.int_size)?;
        if value > u64::from(u32::MAX) {
            return Err(Error::InvalidStruct);
        }
        Ok(value as u32)
    }

    /// An index-table entry: `long_size` bytes on the wire.
    pub(crate) fn read_offset<R: Read>(&self, reader: &mut R) -> Result<u64> {
        self.read_uint(reader, self.long_size)
    }
}

pub(crate) fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    reader.read_u8().map_err(Error::from_read)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(Error::from_read)
}

/// Read a single-byte-length-prefixed name. A zero length decodes as
/// `None`.
fn read_name<R: Read>(reader: &mut R) -> Result<Option<String>> {
    let len = read_u8(reader)?;
    if len == 0 {
        return Ok(None);
    }

    let mut buf = vec![0u8; len as usize];
    read_exact(reader, &mut buf)?;
    let name = String::from_utf8(buf).map_err(|_| Error::InvalidStruct)?;
    Ok(Some(name))
}

/// Read and validate the fixed archive header, deriving the byte order and
/// field widths as they arrive.
pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<DarxHeader> {
    let mut magic_bytes = [0u8; 4];
    read_exact(reader, &mut magic_bytes)?;
    if &magic_bytes != MAGIC_BYTES {
        return Err(Error::InvalidStruct);
    }

    let mut marker = [0u8; 4];
    read_exact(reader, &mut marker)?;
    let big_endian = marker[3] == (ENDIAN_MARK & 0xff) as u8;
    tracing::debug!(
        stored = if big_endian { "big" } else { "little" },
        native = if endian::native_is_big_endian() {
            "big"
        } else {
            "little"
        },
        "file endianness"
    );

    let int_size = read_u8(reader)?;
    let long_size = read_u8(reader)?;
    // Recorded widths must fit the u64 fields they decode into.
    if int_size == 0 || int_size > 8 || long_size == 0 || long_size > 8 {
        return Err(Error::InvalidStruct);
    }

    let info = TypeInfo {
        big_endian,
        int_size,
        long_size,
    };
    if info.needs_swap() {
        tracing::debug!("multi-byte fields will be byte-swapped");
    }

    let tensor_count = info.read_u16(reader)?;
    tracing::debug!(int_size, long_size, tensor_count, "archive header");

    Ok(DarxHeader {
        magic_bytes,
        big_endian,
        int_size,
        long_size,
        tensor_count,
    })
}

pub(crate) trait DeserializeOwned: Sized {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R, info: &TypeInfo) -> Result<Self>;
}

impl DeserializeOwned for ElementType {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R, info: &TypeInfo) -> Result<Self> {
        let tag = read_u8(reader)?;
        let components = read_u8(reader)?;
        let bit_width = read_u8(reader)?;
        tracing::debug!(tag, components, bit_width, "element type");

        if let Some(kind) = ScalarKind::from_tag(tag) {
            return Ok(ElementType::Simple {
                kind,
                components,
                bit_width,
            });
        }

        match tag {
            TYPE_MIXED => {
                let mut subtypes = Vec::with_capacity(components as usize);
                for _ in 0..components {
                    subtypes.push(ElementType::deserialize_owned(reader, info)?);
                }
                Ok(ElementType::Mixed {
                    components,
                    bit_width,
                    subtypes,
                })
            }
            TYPE_CUSTOM => {
                let name = read_name(reader)?;
                Ok(ElementType::Custom {
                    components,
                    bit_width,
                    name,
                })
            }
            tag => Err(Error::UnsupportedElementType(tag)),
        }
    }
}

impl DeserializeOwned for Compression {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R, _info: &TypeInfo) -> Result<Self> {
        Ok(Compression::from_id(read_u8(reader)?))
    }
}

impl DeserializeOwned for Tensor {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R, info: &TypeInfo) -> Result<Self> {
        let start = reader.stream_position().map_err(Error::Io)?;

        let name = read_name(reader)?;
        let rank = read_u8(reader)?;
        let mut dims = Vec::with_capacity(rank as usize);
        for _ in 0..rank {
            dims.push(info.read_dim(reader)?);
        }

        let element_type = ElementType::deserialize_owned(reader, info)?;
        let compression = Compression::deserialize_owned(reader, info)?;

        let compressed_len = info.read_u32(reader)?;
        let mut compressed = vec![0u8; compressed_len as usize];
        read_exact(reader, &mut compressed)?;

        let mut payload = Vec::with_capacity(compressed.len());
        compression.decompress_write(&compressed[..], &mut payload)?;

        let end = reader.stream_position().map_err(Error::Io)?;
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", end),
            bytes = end - start,
            name = name.as_deref().unwrap_or(""),
            rank,
            payload = payload.len(),
            "deserialized Tensor"
        );

        Ok(Tensor {
            name,
            dims,
            element_type,
            compression,
            payload: Some(payload),
        })
    }
}
