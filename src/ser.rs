use std::io::{Cursor, Write};

use byteorder::{NativeEndian, WriteBytesExt};

use crate::{
    compression::Compression,
    element::ElementType,
    error::{Error, Result},
    header::{DarxHeader, ENDIAN_MARK},
    record::Tensor,
};

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()>;
}

/// Write a name with its single length-prefix byte.
fn write_name<W: Write>(writer: &mut W, name: &str) -> Result<()> {
    if name.len() > u8::MAX as usize {
        return Err(Error::InvalidStruct);
    }

    writer.write_u8(name.len() as u8)?;
    writer.write_all(name.as_bytes())?;
    Ok(())
}

impl Serialize for ElementType {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.tag())?;
        writer.write_u8(self.components())?;
        writer.write_u8(self.bit_width())?;

        match self {
            ElementType::Simple { .. } => Ok(()),
            ElementType::Mixed { subtypes, .. } => {
                // The component count already on the wire doubles as the
                // subtype count.
                for subtype in subtypes {
                    subtype.write(writer)?;
                }
                Ok(())
            }
            ElementType::Custom { name, .. } => {
                write_name(writer, name.as_deref().unwrap_or("Unknown"))
            }
        }
    }
}

impl Serialize for Compression {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        Ok(writer.write_u8(self.id())?)
    }
}

impl Serialize for Tensor {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self.name() {
            Some(name) => write_name(writer, name)?,
            None => writer.write_u8(0)?,
        }

        if self.dims.len() > u8::MAX as usize {
            return Err(Error::InvalidStruct);
        }
        writer.write_u8(self.dims.len() as u8)?;
        for dim in &self.dims {
            writer.write_u32::<NativeEndian>(*dim)?;
        }

        self.element_type.write(writer)?;

        let payload = match self.payload.as_deref() {
            Some(payload) => payload,
            None => return Err(Error::InvalidStruct),
        };

        let mut compressed = Vec::new();
        let mut reader = payload;
        let count = self
            .compression
            .compress(Cursor::new(&mut compressed), &mut reader)?;
        tracing::debug!(
            read = count.read,
            written = count.write,
            compression = %self.compression,
            "compressed tensor payload"
        );

        if compressed.len() > u32::MAX as usize {
            return Err(Error::InvalidStruct);
        }

        self.compression.write(writer)?;
        writer.write_u32::<NativeEndian>(compressed.len() as u32)?;
        writer.write_all(&compressed)?;
        Ok(())
    }
}

impl Serialize for DarxHeader {
    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.magic_bytes)?;
        writer.write_u32::<NativeEndian>(ENDIAN_MARK)?;
        writer.write_u8(self.int_size)?;
        writer.write_u8(self.long_size)?;
        writer.write_u16::<NativeEndian>(self.tensor_count)?;
        Ok(())
    }
}
