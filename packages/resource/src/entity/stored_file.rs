use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use common::entity::{Entity, RecordMeta};
use common::pdf_convert_status::PdfConvertStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded file together with its derived artifacts.
///
/// Each payload (content, original content, PDF) can be held inline or by
/// reference to an out-of-line store. Both slots exist; which one is used is
/// up to the caller and the persistence layer.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[serde(flatten)]
    pub meta: RecordMeta,

    pub filename: Option<String>,
    pub mime_type: Option<String>,

    /// Byte length of the primary content.
    #[serde(default)]
    pub filesize: u64,

    pub content: Option<Vec<u8>>,
    pub content_file_id: Option<String>,

    /// MD5 of `content`.
    pub md5_content: Option<Vec<u8>>,

    /// Pre-conversion payload. The stored field name keeps its historical spelling.
    #[serde(rename = "orginalContent")]
    pub original_content: Option<Vec<u8>>,
    pub original_content_file_id: Option<String>,

    pub pdf_convert_status: Option<PdfConvertStatus>,
    pub pdf_content: Option<Vec<u8>>,
    pub pdf_content_file_id: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Owning domain object, referenced by id only.
    pub related_object_id: Option<Uuid>,
    /// Type tag of the related object.
    pub related_object_class: Option<String>,
}

impl StoredFile {
    /// A new file with a freshly generated id.
    pub fn new() -> Self {
        Self::from_meta(RecordMeta::new(None))
    }

    /// A file attached to an id that already exists in storage.
    pub fn with_id(id: Uuid) -> Self {
        Self::from_meta(RecordMeta::new(Some(id)))
    }

    fn from_meta(meta: RecordMeta) -> Self {
        Self {
            meta,
            filename: None,
            mime_type: None,
            filesize: 0,
            content: None,
            content_file_id: None,
            md5_content: None,
            original_content: None,
            original_content_file_id: None,
            pdf_convert_status: None,
            pdf_content: None,
            pdf_content_file_id: None,
            metadata: HashMap::new(),
            related_object_id: None,
            related_object_class: None,
        }
    }

    /// Drop every inline payload, keeping out-of-line references.
    pub fn strip_payloads(&mut self) {
        self.content = None;
        self.original_content = None;
        self.pdf_content = None;
    }

    /// Forget the PDF rendition, inline and referenced.
    pub fn clear_pdf(&mut self) {
        self.pdf_content = None;
        self.pdf_content_file_id = None;
    }

    pub fn has_inline_content(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Name for the PDF rendition: the extension is replaced by `pdf`, or
    /// `.pdf` is appended when the name has none.
    pub fn pdf_filename(&self) -> Option<String> {
        self.filename.as_deref().map(|name| match name.rfind('.') {
            Some(i) => format!("{}.pdf", &name[..i]),
            None => format!("{name}.pdf"),
        })
    }
}

impl Default for StoredFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for StoredFile {
    const COLLECTION: &'static str = "storedFile";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}

impl PartialEq for StoredFile {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta
    }
}

impl Eq for StoredFile {}

impl Hash for StoredFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.meta.hash(state);
    }
}

// Payloads can be megabytes; print their sizes only.
impl fmt::Debug for StoredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = |p: &Option<Vec<u8>>| p.as_ref().map(Vec::len);
        f.debug_struct("StoredFile")
            .field("meta", &self.meta)
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("filesize", &self.filesize)
            .field("content_len", &len(&self.content))
            .field("content_file_id", &self.content_file_id)
            .field("md5_content", &self.md5_content)
            .field("original_content_len", &len(&self.original_content))
            .field("original_content_file_id", &self.original_content_file_id)
            .field("pdf_convert_status", &self.pdf_convert_status)
            .field("pdf_content_len", &len(&self.pdf_content))
            .field("pdf_content_file_id", &self.pdf_content_file_id)
            .field("metadata", &self.metadata)
            .field("related_object_id", &self.related_object_id)
            .field("related_object_class", &self.related_object_class)
            .finish()
    }
}
