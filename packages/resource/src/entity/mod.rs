mod stored_file;

pub use common::entity::{AuditStamp, Entity, RecordMeta};
pub use common::pdf_convert_status::PdfConvertStatus;
pub use stored_file::StoredFile;
