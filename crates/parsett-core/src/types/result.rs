use serde::Serialize;

use super::quality::{AudioCodec, HdrFormat, Quality, Resolution, VideoCodec};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Metadata extracted from a release title.
///
/// Serializes to a JSON object in field order. Absent, empty and `false`
/// fields are left out; `title` is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTitle {
    /// Cleaned-up title text.
    pub title: String,

    /// Release year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    /// Video resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,

    /// Release source (BluRay, WEB-DL, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,

    /// Video codec.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<VideoCodec>,

    /// Audio codecs in order of appearance.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audio: Vec<AudioCodec>,

    /// Audio channel layouts such as `5.1`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,

    /// Release group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// File container (extension without the dot).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<u32>,

    /// Language codes (`en`, `fr`, ..., or `multi`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub extended: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub hardcoded: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub proper: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub repack: bool,

    /// Source site prefix, e.g. `www.Torrenting.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,

    /// Colour bit depth, e.g. `10bit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hdr: Vec<HdrFormat>,
}

impl ParsedTitle {
    /// Creates a result carrying only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if anything beyond the title was extracted.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        self.year.is_some()
            || self.resolution.is_some()
            || self.quality.is_some()
            || self.codec.is_some()
            || !self.episodes.is_empty()
            || !self.seasons.is_empty()
    }
}

impl std::fmt::Display for ParsedTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParsedTitle(title={:?}", self.title)?;
        if let Some(year) = self.year {
            write!(f, ", year={year}")?;
        }
        if !self.seasons.is_empty() {
            write!(f, ", seasons={:?}", self.seasons)?;
        }
        if !self.episodes.is_empty() {
            write!(f, ", episodes={:?}", self.episodes)?;
        }
        if let Some(res) = self.resolution {
            write!(f, ", res={res}")?;
        }
        write!(f, ")")
    }
}
