use std::sync::Arc;

use murmur::application::ports::HistoryRepository;
use murmur::domain::{BlobName, HistoryRecord, RecordId, Transcript};
use murmur::infrastructure::history::JsonHistoryRepository;

fn record(file_name: &str) -> HistoryRecord {
    let id = RecordId::new();
    let blob_name = BlobName::new(&id, file_name);
    HistoryRecord::new(
        id,
        file_name.to_string(),
        &blob_name,
        Transcript {
            text: format!("transcript of {}", file_name),
            segments: Vec::new(),
            language: Some("en".to_string()),
        },
    )
}

fn create_repository() -> (tempfile::TempDir, JsonHistoryRepository) {
    let dir = tempfile::TempDir::new().unwrap();
    let repository = JsonHistoryRepository::new(dir.path().join("history.json")).unwrap();
    (dir, repository)
}

#[tokio::test]
async fn given_missing_document_when_listing_then_returns_empty() {
    let (_dir, repository) = create_repository();

    let records = repository.list().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn given_corrupt_document_when_listing_then_degrades_to_empty() {
    let (dir, repository) = create_repository();
    std::fs::write(dir.path().join("history.json"), b"{ not json").unwrap();

    let records = repository.list().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn given_two_appends_when_listing_then_newest_comes_first() {
    let (_dir, repository) = create_repository();

    let first = record("first.mp3");
    let second = record("second.mp3");

    repository.append(first.clone()).await.unwrap();
    repository.append(second.clone()).await.unwrap();

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second.id);
    assert_eq!(records[1].id, first.id);
}

#[tokio::test]
async fn given_existing_id_when_removing_then_returns_record_and_shrinks_list() {
    let (_dir, repository) = create_repository();

    let kept = record("kept.wav");
    let doomed = record("doomed.wav");
    repository.append(kept.clone()).await.unwrap();
    repository.append(doomed.clone()).await.unwrap();

    let removed = repository.remove(&doomed.id).await.unwrap();
    assert_eq!(removed.map(|r| r.id), Some(doomed.id));

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, kept.id);
}

#[tokio::test]
async fn given_unknown_id_when_removing_then_returns_none_without_mutation() {
    let (_dir, repository) = create_repository();

    let kept = record("kept.wav");
    repository.append(kept.clone()).await.unwrap();

    let removed = repository.remove(&RecordId::new()).await.unwrap();
    assert!(removed.is_none());

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn given_concurrent_appends_when_listing_then_no_update_is_lost() {
    let (_dir, repository) = create_repository();
    let repository = Arc::new(repository);

    let mut handles = Vec::new();
    for i in 0..10 {
        let repository = Arc::clone(&repository);
        handles.push(tokio::spawn(async move {
            repository.append(record(&format!("file-{}.mp3", i))).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 10);
}

#[tokio::test]
async fn given_completed_writes_when_inspecting_directory_then_no_temp_files_linger() {
    let (dir, repository) = create_repository();

    repository.append(record("one.mp3")).await.unwrap();
    repository.append(record("two.mp3")).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["history.json".to_string()]);
}

#[tokio::test]
async fn given_persisted_document_when_reopening_then_records_survive() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let archived = record("persisted.ogg");
    {
        let repository = JsonHistoryRepository::new(path.clone()).unwrap();
        repository.append(archived.clone()).await.unwrap();
    }

    let reopened = JsonHistoryRepository::new(path).unwrap();
    let records = reopened.list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0], archived);
}
