mod audio_format;
mod blob_name;
mod record;
mod transcript;

pub use audio_format::AudioFormat;
pub use blob_name::BlobName;
pub use record::{HistoryRecord, RecordId};
pub use transcript::{Segment, Transcript};
