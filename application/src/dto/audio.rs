use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct AnalyzeAudioRequest {
    #[validate(length(min = 1))]
    pub data: Vec<u8>,
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
}
