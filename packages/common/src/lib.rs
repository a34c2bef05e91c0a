pub mod checksum;
pub mod config;
pub mod entity;
pub mod pdf_convert_status;

pub use checksum::ContentChecksum;
pub use entity::{AuditStamp, Entity, RecordMeta};
pub use pdf_convert_status::PdfConvertStatus;
