pub mod quality;
pub mod result;

pub use quality::{AudioCodec, HdrFormat, Quality, Resolution, VideoCodec};
pub use result::ParsedTitle;
