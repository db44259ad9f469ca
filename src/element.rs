use std::fmt;

pub mod constants {
    pub const TYPE_INT: u8 = 0;
    pub const TYPE_UINT: u8 = 1;
    pub const TYPE_FLOAT: u8 = 2;
    pub const TYPE_CHAR: u8 = 3;
    pub const TYPE_MIXED: u8 = 4;
    pub const TYPE_CUSTOM: u8 = 5;
}

use self::constants::*;

/// Scalar interpretation of the values in a simple element type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScalarKind {
    Int,
    Uint,
    Float,
    Char,
}

impl ScalarKind {
    pub const fn tag(self) -> u8 {
        use ScalarKind::*;

        match self {
            Int => TYPE_INT,
            Uint => TYPE_UINT,
            Float => TYPE_FLOAT,
            Char => TYPE_CHAR,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<ScalarKind> {
        use ScalarKind::*;

        match tag {
            TYPE_INT => Some(Int),
            TYPE_UINT => Some(Uint),
            TYPE_FLOAT => Some(Float),
            TYPE_CHAR => Some(Char),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ScalarKind::*;

        let s = match self {
            Int => "int",
            Uint => "uint",
            Float => "float",
            Char => "char",
        };

        write!(f, "{}", s)
    }
}

/// Describes the layout of one element of a tensor's payload.
///
/// A type tree is exclusively owned by the tensor (or the parent `Mixed`
/// node) holding it. `components` is the number of values per element and
/// `bit_width` the size of each value in bits; for `Custom` both are
/// descriptive only and not interpreted by the codec.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ElementType {
    Simple {
        kind: ScalarKind,
        components: u8,
        bit_width: u8,
    },
    Mixed {
        components: u8,
        bit_width: u8,
        subtypes: Vec<ElementType>,
    },
    Custom {
        components: u8,
        bit_width: u8,
        name: Option<String>,
    },
}

impl ElementType {
    #[inline(always)]
    pub fn simple(kind: ScalarKind, components: u8, bit_width: u8) -> ElementType {
        ElementType::Simple {
            kind,
            components,
            bit_width,
        }
    }

    /// A mixed type holds one subtype per component, so the component
    /// count is taken from the subtype list. Returns `None` when the list
    /// cannot be described by the single count byte on the wire.
    pub fn mixed(bit_width: u8, subtypes: Vec<ElementType>) -> Option<ElementType> {
        if subtypes.len() > u8::MAX as usize {
            return None;
        }

        Some(ElementType::Mixed {
            components: subtypes.len() as u8,
            bit_width,
            subtypes,
        })
    }

    #[inline(always)]
    pub fn custom(components: u8, bit_width: u8, name: Option<&str>) -> ElementType {
        ElementType::Custom {
            components,
            bit_width,
            name: name.map(str::to_string),
        }
    }

    /// The unknown-type sentinel: an opaque single-component byte layout.
    pub fn unknown() -> ElementType {
        ElementType::custom(1, 8, Some("unknown"))
    }

    pub fn tag(&self) -> u8 {
        match self {
            ElementType::Simple { kind, .. } => kind.tag(),
            ElementType::Mixed { .. } => TYPE_MIXED,
            ElementType::Custom { .. } => TYPE_CUSTOM,
        }
    }

    #[inline(always)]
    pub fn components(&self) -> u8 {
        match self {
            ElementType::Simple { components, .. }
            | ElementType::Mixed { components, .. }
            | ElementType::Custom { components, .. } => *components,
        }
    }

    #[inline(always)]
    pub fn bit_width(&self) -> u8 {
        match self {
            ElementType::Simple { bit_width, .. }
            | ElementType::Mixed { bit_width, .. }
            | ElementType::Custom { bit_width, .. } => *bit_width,
        }
    }

    #[inline(always)]
    pub fn as_mixed(&self) -> Option<&[ElementType]> {
        match self {
            ElementType::Mixed { subtypes, .. } => Some(subtypes),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn custom_name(&self) -> Option<&str> {
        match self {
            ElementType::Custom { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Simple {
                kind,
                components,
                bit_width,
            } => write!(f, "{}({}x{})", kind, components, bit_width),
            ElementType::Mixed { subtypes, .. } => {
                write!(f, "mixed(")?;
                for (i, subtype) in subtypes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", subtype)?;
                }
                write!(f, ")")
            }
            ElementType::Custom { name, .. } => {
                write!(f, "custom({:?})", name.as_deref().unwrap_or("Unknown"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_takes_count_from_subtypes() {
        let ty = ElementType::mixed(
            8,
            vec![
                ElementType::simple(ScalarKind::Uint, 1, 8),
                ElementType::simple(ScalarKind::Int, 1, 16),
            ],
        )
        .unwrap();

        assert_eq!(ty.tag(), constants::TYPE_MIXED);
        assert_eq!(ty.components(), 2);
        assert_eq!(ty.as_mixed().unwrap().len(), 2);
    }

    #[test]
    fn mixed_rejects_oversized_subtype_list() {
        let subtypes = vec![ElementType::simple(ScalarKind::Uint, 1, 8); 256];
        assert!(ElementType::mixed(8, subtypes).is_none());
    }

    #[test]
    fn unknown_sentinel_shape() {
        let ty = ElementType::unknown();
        assert_eq!(ty.tag(), constants::TYPE_CUSTOM);
        assert_eq!(ty.components(), 1);
        assert_eq!(ty.bit_width(), 8);
        assert_eq!(ty.custom_name(), Some("unknown"));
    }
}
