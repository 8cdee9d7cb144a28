pub mod error;

pub use error::{ClassifierError, ErrorKind};
