use bytes::Bytes;

use murmur::application::ports::BlobStore;
use murmur::domain::{BlobName, RecordId};
use murmur::infrastructure::storage::LocalBlobStore;

fn create_store() -> (tempfile::TempDir, LocalBlobStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalBlobStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_saved_blob_when_opening_then_bytes_match_original() {
    let (_dir, store) = create_store();
    let id = RecordId::new();
    let name = BlobName::new(&id, "clip.mp3");

    let content = b"fake mp3 bytes";
    store
        .save(&name, Bytes::from(&content[..]))
        .await
        .unwrap();

    let fetched = store.open(name.as_str()).await.unwrap();
    assert_eq!(fetched, content);
}

#[tokio::test]
async fn given_saved_blob_when_resolving_by_bare_id_then_returns_stored_name() {
    let (_dir, store) = create_store();
    let id = RecordId::new();
    let name = BlobName::new(&id, "My Song.mp3");

    store.save(&name, Bytes::from("audio")).await.unwrap();

    let resolved = store.resolve(&id.as_uuid().to_string()).await.unwrap();
    assert_eq!(resolved.as_deref(), Some(name.as_str()));
}

#[tokio::test]
async fn given_saved_blob_when_resolving_by_full_name_then_returns_stored_name() {
    let (_dir, store) = create_store();
    let id = RecordId::new();
    let name = BlobName::new(&id, "My Song.mp3");

    store.save(&name, Bytes::from("audio")).await.unwrap();

    let resolved = store.resolve(name.as_str()).await.unwrap();
    assert_eq!(resolved.as_deref(), Some(name.as_str()));
}

#[tokio::test]
async fn given_unknown_reference_when_resolving_then_returns_none() {
    let (_dir, store) = create_store();
    let id = RecordId::new();
    let name = BlobName::new(&id, "clip.ogg");
    store.save(&name, Bytes::from("audio")).await.unwrap();

    let resolved = store.resolve("unknownid").await.unwrap();
    assert!(resolved.is_none());
}

#[tokio::test]
async fn given_existing_blob_when_deleting_then_returns_true_and_blob_is_gone() {
    let (_dir, store) = create_store();
    let id = RecordId::new();
    let name = BlobName::new(&id, "clip.wav");
    store.save(&name, Bytes::from("audio")).await.unwrap();

    assert!(store.delete(name.as_str()).await.unwrap());
    assert!(store.open(name.as_str()).await.is_err());
}

#[tokio::test]
async fn given_missing_blob_when_deleting_then_is_noop_returning_false() {
    let (_dir, store) = create_store();

    let removed = store.delete("nothing-here.mp3").await.unwrap();
    assert!(!removed);
}

#[tokio::test]
async fn given_missing_blob_when_opening_then_returns_error() {
    let (_dir, store) = create_store();

    let result = store.open("missing.mp3").await;
    assert!(result.is_err());
}
