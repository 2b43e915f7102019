use murmur::domain::{BlobName, HistoryRecord, RecordId, Transcript};

fn sample_transcript() -> Transcript {
    Transcript {
        text: "hello world".to_string(),
        segments: Vec::new(),
        language: Some("en".to_string()),
    }
}

#[test]
fn given_two_record_ids_when_generated_then_are_unique() {
    let id1 = RecordId::new();
    let id2 = RecordId::new();
    assert_ne!(id1, id2);
}

#[test]
fn given_new_record_when_created_then_audio_ref_points_at_blob() {
    let id = RecordId::new();
    let blob_name = BlobName::new(&id, "lecture.mp3");
    let record = HistoryRecord::new(id, "lecture.mp3".to_string(), &blob_name, sample_transcript());

    assert_eq!(
        record.audio_ref,
        format!("/history/audio/{}_lecture.mp3", id.as_uuid())
    );
    assert_eq!(record.blob_name(), blob_name.as_str());
}

#[test]
fn given_record_when_serialized_then_uses_camel_case_wire_names() {
    let id = RecordId::new();
    let blob_name = BlobName::new(&id, "song.wav");
    let record = HistoryRecord::new(id, "song.wav".to_string(), &blob_name, sample_transcript());

    let json = serde_json::to_value(&record).unwrap();

    assert!(json.get("fileName").is_some());
    assert!(json.get("createdAt").is_some());
    assert!(json.get("audioRef").is_some());
    assert!(json.get("transcription").is_some());
}

#[test]
fn given_serialized_record_when_deserialized_then_round_trips() {
    let id = RecordId::new();
    let blob_name = BlobName::new(&id, "song.wav");
    let record = HistoryRecord::new(id, "song.wav".to_string(), &blob_name, sample_transcript());

    let json = serde_json::to_string(&record).unwrap();
    let parsed: HistoryRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, record);
}
