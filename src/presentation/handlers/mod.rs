mod audio;
mod health;
mod history;
pub mod transcribe;

pub use audio::get_audio_handler;
pub use health::health_handler;
pub use history::{delete_history_handler, list_history_handler};
pub use transcribe::transcribe_handler;
