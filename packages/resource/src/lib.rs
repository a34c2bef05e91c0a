pub mod config;
pub mod entity;
pub mod error;
pub mod repository;
pub mod service;

pub use entity::{PdfConvertStatus, StoredFile};
pub use error::ResourceError;
pub use service::ResourceService;
