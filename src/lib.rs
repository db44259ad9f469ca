mod compression;
#[cfg(feature = "reader")]
mod de;
mod element;
pub mod endian;
mod error;
mod file;
mod header;
mod record;
#[cfg(feature = "writer")]
mod ser;

pub use compression::Compression;
pub use element::{ElementType, ScalarKind};
pub use error::{Error, Result};
pub use file::Archive;
#[cfg(feature = "reader")]
pub use file::reader::is_darx;
pub use record::Tensor;

#[doc(hidden)]
pub use comde;
