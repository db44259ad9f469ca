use crate::{compression::Compression, element::ElementType};

/// One named, typed, multi-dimensional buffer stored as a record in the
/// archive.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tensor {
    /// Name of the tensor. `None` (or an empty string) round-trips as
    /// unnamed: a zero length byte and no name bytes on the wire.
    pub name: Option<String>,

    /// Length of each dimension, in order. The rank of the tensor is the
    /// number of dimensions and must fit the single rank byte.
    pub dims: Vec<u32>,

    /// Layout of one element of the payload.
    pub element_type: ElementType,

    /// Transform applied to the payload when the record is written.
    pub compression: Compression,

    /// Raw payload bytes, `None` until data is attached. A tensor without
    /// a payload cannot be encoded. The size as stored is the exact byte
    /// count written, never validated against the dimensions.
    pub payload: Option<Vec<u8>>,
}

impl Tensor {
    pub fn new(name: Option<&str>, dims: Vec<u32>, element_type: ElementType) -> Tensor {
        Tensor {
            name: name.map(str::to_string),
            dims,
            element_type,
            compression: Compression::default(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Vec<u8>) -> Tensor {
        self.payload = Some(payload);
        self
    }

    #[inline(always)]
    pub fn name(&self) -> Option<&str> {
        match self.name.as_deref() {
            Some("") | None => None,
            name => name,
        }
    }

    /// Number of dimensions.
    #[inline(always)]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Logical element count described by the dimensions. Informational
    /// only; the codec does no arithmetic on the payload.
    #[inline(always)]
    pub fn element_count(&self) -> u64 {
        self.dims.iter().map(|d| u64::from(*d)).product()
    }

    #[inline(always)]
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementType, ScalarKind};

    #[test]
    fn empty_name_is_unnamed() {
        let mut tensor = Tensor::new(None, vec![1], ElementType::simple(ScalarKind::Uint, 1, 8));
        assert_eq!(tensor.name(), None);

        tensor.name = Some(String::new());
        assert_eq!(tensor.name(), None);

        tensor.name = Some("weights".to_string());
        assert_eq!(tensor.name(), Some("weights"));
    }

    #[test]
    fn element_count_is_the_dim_product() {
        let tensor = Tensor::new(
            None,
            vec![4, 4, 3],
            ElementType::simple(ScalarKind::Uint, 1, 8),
        );
        assert_eq!(tensor.rank(), 3);
        assert_eq!(tensor.element_count(), 48);
    }
}
