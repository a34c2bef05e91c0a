use resource::entity::{Entity, PdfConvertStatus, StoredFile};
use resource::error::ResourceError;
use uuid::Uuid;

use crate::common::{TestApp, text_file};

mod round_trip {
    use super::*;

    #[tokio::test]
    async fn saved_file_reloads_with_stamped_audit_fields() {
        let app = TestApp::spawn_as("alice");
        let u1 = Uuid::new_v4();
        let mut file = StoredFile::with_id(u1);
        file.filename = Some("a.txt".into());
        file.content = Some(b"some bytes".to_vec());
        let original = file.clone();

        app.service.save(file).await.unwrap();
        let reloaded = app.service.get_by_id(u1).await.unwrap();

        assert_eq!(reloaded, original);
        assert_eq!(reloaded.id(), u1);
        assert!(!reloaded.is_new());
        assert_eq!(reloaded.meta.version, Some(1));
        assert_eq!(reloaded.meta.created_by.as_deref(), Some("alice"));
        assert_eq!(reloaded.meta.modified_by.as_deref(), Some("alice"));
        assert!(reloaded.meta.created.is_some());
        assert!(reloaded.meta.modified.is_some());
        assert_eq!(reloaded.filename.as_deref(), Some("a.txt"));
        assert_eq!(reloaded.content.as_deref(), Some(&b"some bytes"[..]));
        assert_eq!(reloaded.filesize, 10);
    }

    #[tokio::test]
    async fn stored_document_uses_storage_field_names() {
        let app = TestApp::spawn();
        let mut file = text_file("notes.txt", b"abc");
        file.related_object_id = Some(Uuid::new_v4());
        file.related_object_class = Some("Invoice".into());
        let saved = app.service.save(file).await.unwrap();

        let doc = app
            .store
            .document(StoredFile::COLLECTION, saved.id())
            .await
            .unwrap();
        assert_eq!(doc["filename"], "notes.txt");
        assert_eq!(doc["mimeType"], "text/plain");
        assert_eq!(doc["relatedObjectClass"], "Invoice");
        assert_eq!(doc["pdfConvertStatus"], "NOT_CONVERTED");
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["createdBy"], "integration");
        assert!(doc.get("persisted").is_none());
        assert_eq!(app.store.len("storedFile").await, 1);
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn stale_update_reports_conflict() {
        let app = TestApp::spawn();
        let saved = app.service.save(text_file("a.txt", b"v1")).await.unwrap();

        let mut first = app.service.get_by_id(saved.id()).await.unwrap();
        let mut second = app.service.get_by_id(saved.id()).await.unwrap();

        first.content = Some(b"v2 from first".to_vec());
        app.service.save(first).await.unwrap();

        second.content = Some(b"v2 from second".to_vec());
        let err = app.service.save(second).await.unwrap_err();
        assert!(err.is_conflict());

        let current = app.service.get_by_id(saved.id()).await.unwrap();
        assert_eq!(current.content.as_deref(), Some(&b"v2 from first"[..]));
        assert_eq!(current.meta.version, Some(2));
    }

    #[tokio::test]
    async fn reloading_after_conflict_allows_retry() {
        let app = TestApp::spawn();
        let saved = app.service.save(text_file("a.txt", b"v1")).await.unwrap();
        let stale = saved.clone();
        app.service.save(saved).await.unwrap();

        assert!(app.service.save(stale.clone()).await.unwrap_err().is_conflict());

        let mut fresh = app.service.get_by_id(stale.id()).await.unwrap();
        fresh.metadata.insert("retried".into(), "yes".into());
        let retried = app.service.save(fresh).await.unwrap();
        assert_eq!(retried.meta.version, Some(3));
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn soft_deleted_file_is_still_loadable() {
        let app = TestApp::spawn();
        let saved = app.service.save(text_file("a.txt", b"hello")).await.unwrap();

        app.service.delete(saved.id()).await.unwrap();

        let loaded = app.service.get_by_id(saved.id()).await.unwrap();
        assert!(!loaded.is_active());
        assert_eq!(loaded, saved);
        assert_eq!(app.service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn file_without_content_needs_no_conversion() {
        let app = TestApp::spawn();
        let mut file = StoredFile::new();
        file.filename = Some("placeholder".into());
        let saved = app.service.save(file).await.unwrap();

        assert_eq!(saved.pdf_convert_status, Some(PdfConvertStatus::NotNeeded));
        assert!(saved.md5_content.is_none());
        assert!(app.service.next_conversion_batch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn();
        assert!(matches!(
            app.service.get_by_id_no_content(Uuid::new_v4()).await,
            Err(ResourceError::NotFound(_))
        ));
    }
}
