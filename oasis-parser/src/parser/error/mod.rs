pub mod kind;

pub use oasis_error::{Error, ErrorKind};
