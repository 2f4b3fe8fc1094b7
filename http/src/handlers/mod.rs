mod audio;
mod document;
mod health;

pub use audio::analyze_audio;
pub use document::analyze_document;
pub use health::{health_check, root};
