// Image moderation: trait-based abstraction over the classification service.
//
// The ModerationClient trait defines the interface. RekognitionClient
// implements it with AWS Rekognition's DetectModerationLabels. The normalizer
// turns whatever labels come back into the fixed five-field score string.

pub mod normalize;
pub mod rekognition;
pub mod traits;
