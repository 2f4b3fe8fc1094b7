mod audio;
mod document;

pub use audio::{AudioAnalysisUseCase, AudioAnalysisUseCaseImpl};
pub use document::{DocumentAnalysisUseCase, DocumentAnalysisUseCaseImpl};
