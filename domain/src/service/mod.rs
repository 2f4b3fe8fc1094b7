mod highlight;
mod score;
mod segment;

pub use highlight::select_highlights;
pub use score::{aggregate, combine};
pub use segment::{segment_audio, segment_text};
