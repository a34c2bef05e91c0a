use std::sync::Arc;

use resource::config::AppConfig;
use resource::entity::StoredFile;
use resource::repository::{DocumentRepository, FixedAuditor, MemoryDocumentStore};
use resource::service::ResourceService;

/// A service plus direct access to the documents it writes.
pub struct TestApp {
    pub service: ResourceService,
    pub store: Arc<MemoryDocumentStore>,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_as("integration")
    }

    pub fn spawn_as(auditor: &str) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let repository = DocumentRepository::<StoredFile>::new(
            store.clone(),
            Arc::new(FixedAuditor::new(auditor)),
        );
        let service = ResourceService::new(Arc::new(repository), AppConfig::default().conversion);
        Self { service, store }
    }
}

pub fn text_file(name: &str, content: &[u8]) -> StoredFile {
    let mut file = StoredFile::new();
    file.filename = Some(name.into());
    file.mime_type = Some("text/plain".into());
    file.content = Some(content.to_vec());
    file
}
