use serde::{Deserialize, Serialize};

/// Normalized transcription result, stable across engine implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: Option<String>,
}

/// One timed slice of the transcript. Indices are assigned sequentially in
/// emission order; engine-side segment ids are not trusted to be stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}
