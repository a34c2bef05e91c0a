use std::sync::Arc;

use common::checksum::ContentChecksum;
use common::config::ConversionConfig;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::entity::{Entity, PdfConvertStatus, StoredFile};
use crate::error::ResourceError;
use crate::repository::{DocumentRepository, FixedAuditor, MemoryDocumentStore, Repository};

/// Stored-file operations on top of a [`Repository`].
///
/// Keeps the checksum and PDF conversion status consistent with the inline
/// content on every save, and turns deletion into deactivation.
pub struct ResourceService {
    repository: Arc<dyn Repository<StoredFile>>,
    conversion: ConversionConfig,
}

impl ResourceService {
    pub fn new(repository: Arc<dyn Repository<StoredFile>>, conversion: ConversionConfig) -> Self {
        Self {
            repository,
            conversion,
        }
    }

    /// Service backed by a fresh in-process document store.
    pub fn in_memory(config: &AppConfig) -> Self {
        let repository = DocumentRepository::<StoredFile>::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(FixedAuditor::from_config(&config.audit)),
        );
        Self::new(Arc::new(repository), config.conversion.clone())
    }

    pub async fn save(&self, mut file: StoredFile) -> Result<StoredFile, ResourceError> {
        prepare_for_save(&mut file);
        let saved = self.repository.save(file).await?;
        debug!(
            id = %saved.id(),
            version = ?saved.meta.version,
            status = ?saved.pdf_convert_status,
            "Stored file saved"
        );
        Ok(saved)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, ResourceError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<StoredFile, ResourceError> {
        match self.repository.find_by_id(id).await? {
            Some(file) => Ok(file),
            None => {
                warn!(%id, "Stored file not found");
                Err(ResourceError::NotFound(id))
            }
        }
    }

    /// Load a file without any inline payload.
    pub async fn get_by_id_no_content(&self, id: Uuid) -> Result<StoredFile, ResourceError> {
        let mut file = self.get_by_id(id).await?;
        file.strip_payloads();
        Ok(file)
    }

    /// Load a file keeping only its PDF rendition. A rendition left over from
    /// before the last content change is not returned.
    pub async fn get_by_id_pdf_content(&self, id: Uuid) -> Result<StoredFile, ResourceError> {
        let mut file = self.get_by_id(id).await?;
        file.content = None;
        file.original_content = None;
        if !file.pdf_convert_status.is_some_and(|s| s.has_pdf()) {
            file.pdf_content = None;
        }
        Ok(file)
    }

    /// Soft delete: the record stays, flagged inactive.
    pub async fn delete(&self, id: Uuid) -> Result<StoredFile, ResourceError> {
        let mut file = self.get_by_id(id).await?;
        if !file.is_active() {
            return Ok(file);
        }
        file.deactivate();
        let file = self.repository.save(file).await?;
        info!(%id, "Stored file deactivated");
        Ok(file)
    }

    pub async fn count(&self) -> Result<u64, ResourceError> {
        Ok(self.repository.count().await?)
    }

    pub async fn find_all(&self) -> Result<Vec<StoredFile>, ResourceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_active(&self) -> Result<Vec<StoredFile>, ResourceError> {
        let mut files = self.repository.find_all().await?;
        files.retain(|f| f.is_active());
        Ok(files)
    }

    /// Active files still waiting for PDF conversion, at most `limit`.
    pub async fn pending_conversions(
        &self,
        limit: usize,
    ) -> Result<Vec<StoredFile>, ResourceError> {
        let mut files = self.repository.find_all().await?;
        files.retain(|f| {
            f.is_active() && f.pdf_convert_status == Some(PdfConvertStatus::NotConverted)
        });
        let total = files.len();
        files.truncate(limit);
        debug!(total, batch = files.len(), "Pending PDF conversions");
        Ok(files)
    }

    /// One configured batch of [`pending_conversions`](Self::pending_conversions).
    pub async fn next_conversion_batch(&self) -> Result<Vec<StoredFile>, ResourceError> {
        self.pending_conversions(self.conversion.batch_size).await
    }
}

/// Bring checksum, size and conversion status in line with the inline content.
fn prepare_for_save(file: &mut StoredFile) {
    let inline = file.has_inline_content().then(|| {
        let content = file.content.as_deref().unwrap_or_default();
        (ContentChecksum::compute(content), content.len() as u64)
    });

    match inline {
        Some((checksum, len)) => {
            if file.is_new() {
                file.pdf_convert_status = Some(PdfConvertStatus::NotConverted);
            }
            let unchanged = file
                .md5_content
                .as_deref()
                .is_some_and(|stored| checksum.matches(stored));
            // A missing checksum counts as changed content.
            if !unchanged {
                debug!(id = %file.id(), md5 = %checksum, "Content changed, PDF rendition reset");
                file.pdf_convert_status = Some(PdfConvertStatus::NotConverted);
                file.clear_pdf();
                file.md5_content = Some(checksum.to_vec());
            }
            file.filesize = len;
        }
        // Content kept out of line: leave its bookkeeping to whoever wrote it.
        None if file.content_file_id.is_some() => {}
        None => {
            file.pdf_convert_status = Some(PdfConvertStatus::NotNeeded);
            file.clear_pdf();
            file.md5_content = None;
        }
    }
}
