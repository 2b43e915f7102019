mod staged_upload;
mod upload_intake;

pub use staged_upload::StagedUpload;
pub use upload_intake::{IntakeError, UploadIntake};
