pub mod client;
pub mod convert;
pub mod error;
mod retry;
pub mod types;

pub use client::{PrintifyClient, DEFAULT_BASE_URL};
pub use convert::{convert_options_repr, convert_product};
pub use error::PrintifyError;
pub use types::CAPACITY_ERROR_CODE;
