use murmur::domain::{BlobName, RecordId};

#[test]
fn given_id_and_file_name_when_creating_blob_name_then_format_is_id_underscore_name() {
    let id = RecordId::new();
    let name = BlobName::new(&id, "My Song.mp3");

    assert_eq!(name.as_str(), format!("{}_My Song.mp3", id.as_uuid()));
}

#[test]
fn given_stored_name_when_taking_id_prefix_then_returns_part_before_first_separator() {
    assert_eq!(BlobName::id_prefix("abc123_My Song.mp3"), "abc123");
}

#[test]
fn given_bare_id_when_taking_id_prefix_then_returns_whole_input() {
    assert_eq!(BlobName::id_prefix("abc123"), "abc123");
}

#[test]
fn given_file_name_with_underscores_when_taking_id_prefix_then_stops_at_first() {
    assert_eq!(BlobName::id_prefix("abc_my_file_name.wav"), "abc");
}

#[test]
fn given_blob_name_when_displayed_then_matches_as_str() {
    let id = RecordId::new();
    let name = BlobName::new(&id, "clip.ogg");

    assert_eq!(format!("{}", name), name.as_str());
}
