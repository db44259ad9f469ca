use std::io::Write;

use byteorder::{NativeEndian, WriteBytesExt};

use crate::{
    error::{Error, Result},
    header::{DarxHeader, LONG_SIZE},
    ser::Serialize,
};

use super::Archive;

// magic + endian marker + int_size + long_size + tensor_count
const FIXED_HEADER_LEN: u64 = 4 + 4 + 1 + 1 + 2;

impl Archive {
    /// Write the archive in one sequential pass.
    ///
    /// Tensor records are encoded up front so the index table can be laid
    /// down before them without back-patching the output; the writer
    /// therefore never seeks. Multi-byte fields are written in the
    /// machine's native order, which the endianness marker records for
    /// the consumer.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if !self.valid {
            return Err(Error::InvalidStruct);
        }
        if self.tensors.len() > u16::MAX as usize || self.metadata.len() > u16::MAX as usize {
            return Err(Error::InvalidStruct);
        }

        let mut records = Vec::with_capacity(self.tensors.len());
        for tensor in &self.tensors {
            let mut buf = Vec::new();
            tensor.write(&mut buf)?;
            records.push(buf);
        }

        let header = DarxHeader::new(self.tensors.len() as u16);
        header.write(writer)?;

        let mut offset = FIXED_HEADER_LEN
            + self.tensors.len() as u64 * u64::from(LONG_SIZE)
            + 2
            + self.metadata.len() as u64;
        for record in &records {
            tracing::debug!(offset, bytes = record.len(), "tensor index entry");
            writer.write_u64::<NativeEndian>(offset)?;
            offset += record.len() as u64;
        }

        writer.write_u16::<NativeEndian>(self.metadata.len() as u16)?;
        writer.write_all(&self.metadata)?;

        for record in &records {
            writer.write_all(record)?;
        }

        Ok(())
    }
}
