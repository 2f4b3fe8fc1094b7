mod audio;
mod document;

pub use audio::AnalyzeAudioRequest;
pub use document::AnalyzeDocumentRequest;
