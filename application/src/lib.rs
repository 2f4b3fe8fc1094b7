pub mod dto;
pub mod error;
pub mod usecase;

pub use dto::*;
pub use error::*;
pub use usecase::{
    AudioAnalysisUseCase, AudioAnalysisUseCaseImpl, DocumentAnalysisUseCase,
    DocumentAnalysisUseCaseImpl,
};
