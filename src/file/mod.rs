use crate::{endian, record::Tensor};

#[cfg(feature = "reader")]
pub mod reader;
#[cfg(feature = "writer")]
pub mod writer;

/// An in-memory darx archive: free-form metadata plus an ordered tensor
/// collection.
///
/// An archive is either constructed fresh for saving or reconstituted by
/// loading a file; it exclusively owns its tensors and metadata buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Archive {
    /// Runtime guard: saving refuses an archive not marked valid.
    pub valid: bool,

    /// Byte order of the file this archive was loaded from; for a fresh
    /// archive, the running machine's native order (which is what a save
    /// will write).
    pub stored_big_endian: bool,

    /// Opaque archive-level metadata, preserved byte for byte.
    pub metadata: Vec<u8>,

    /// Tensor records, in index-table order.
    pub tensors: Vec<Tensor>,
}

impl Default for Archive {
    fn default() -> Self {
        Archive::new()
    }
}

impl Archive {
    pub fn new() -> Archive {
        Archive {
            valid: true,
            stored_big_endian: endian::native_is_big_endian(),
            metadata: Vec::new(),
            tensors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn tensor_count(&self) -> usize {
        self.tensors.len()
    }

    #[inline(always)]
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    #[inline(always)]
    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }

    pub fn push_tensor(&mut self, tensor: Tensor) {
        self.tensors.push(tensor);
    }
}
