use std::path::PathBuf;

use bytes::Bytes;

use murmur::domain::AudioFormat;
use murmur::infrastructure::intake::{IntakeError, UploadIntake};

#[tokio::test]
async fn given_valid_upload_when_staging_then_file_lands_in_temp_location() {
    let intake = UploadIntake::new(100);

    let staged = intake
        .stage("recording.mp3", Bytes::from("fake audio"))
        .await
        .unwrap();

    assert_eq!(staged.file_name(), "recording.mp3");
    assert_eq!(staged.format(), AudioFormat::Mp3);
    assert_eq!(staged.size_bytes(), 10);
    assert!(staged.path().exists());

    let contents = std::fs::read(staged.path()).unwrap();
    assert_eq!(contents, b"fake audio");
}

#[tokio::test]
async fn given_staged_upload_when_dropped_then_temp_file_is_removed() {
    let intake = UploadIntake::new(100);

    let staged = intake
        .stage("recording.wav", Bytes::from("bytes"))
        .await
        .unwrap();
    let path: PathBuf = staged.path().to_path_buf();
    assert!(path.exists());

    drop(staged);
    assert!(!path.exists());
}

#[tokio::test]
async fn given_unsupported_extension_when_staging_then_rejected_before_any_file_exists() {
    let intake = UploadIntake::new(100);

    let result = intake.stage("notes.txt", Bytes::from("text")).await;

    assert!(matches!(result, Err(IntakeError::UnsupportedType(_))));
}

#[tokio::test]
async fn given_empty_file_name_when_staging_then_rejected_as_no_file_selected() {
    let intake = UploadIntake::new(100);

    let result = intake.stage("", Bytes::from("bytes")).await;

    assert!(matches!(result, Err(IntakeError::NoFileSelected)));
}

#[tokio::test]
async fn given_oversized_upload_when_staging_then_rejected_as_payload_too_large() {
    let intake = UploadIntake::new(0);

    let result = intake.stage("clip.mp3", Bytes::from("some bytes")).await;

    assert!(matches!(
        result,
        Err(IntakeError::PayloadTooLarge { .. })
    ));
}

#[tokio::test]
async fn given_path_traversal_in_name_when_staging_then_only_base_name_survives() {
    let intake = UploadIntake::new(100);

    let staged = intake
        .stage("../../etc/passwd.mp3", Bytes::from("bytes"))
        .await
        .unwrap();

    assert_eq!(staged.file_name(), "passwd.mp3");
}

#[tokio::test]
async fn given_control_characters_in_name_when_staging_then_they_are_stripped() {
    let intake = UploadIntake::new(100);

    let staged = intake
        .stage("re\x00cord\ning.ogg", Bytes::from("bytes"))
        .await
        .unwrap();

    assert_eq!(staged.file_name(), "recording.ogg");
}
