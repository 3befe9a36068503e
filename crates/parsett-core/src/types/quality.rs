use std::fmt;

use serde::{Serialize, Serializer};

/// Serializes an enum through its `Display` form, so JSON carries
/// `"1080p"` rather than the variant name.
macro_rules! serialize_as_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_as_display!(Resolution, Quality, VideoCodec, AudioCodec, HdrFormat);

/// Video resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resolution {
    /// 360p
    SD360,
    /// 480p, Standard Definition
    SD480,
    /// 576p, PAL Standard Definition
    SD576,
    /// 720p, High Definition
    HD720,
    /// 1080p, Full HD
    FHD1080,
    /// 1440p, Quad HD
    QHD1440,
    /// 2160p, Ultra HD / 4K
    UHD2160,
}

impl Resolution {
    /// Maps a vertical line count (`1080`, `720`, ...) to a resolution.
    #[must_use]
    pub fn from_height(height: &str) -> Option<Self> {
        match height {
            "2160" => Some(Self::UHD2160),
            "1440" => Some(Self::QHD1440),
            "1080" => Some(Self::FHD1080),
            "720" => Some(Self::HD720),
            "576" => Some(Self::SD576),
            "480" => Some(Self::SD480),
            "360" => Some(Self::SD360),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SD360 => write!(f, "360p"),
            Self::SD480 => write!(f, "480p"),
            Self::SD576 => write!(f, "576p"),
            Self::HD720 => write!(f, "720p"),
            Self::FHD1080 => write!(f, "1080p"),
            Self::QHD1440 => write!(f, "1440p"),
            Self::UHD2160 => write!(f, "2160p"),
        }
    }
}

/// Release source quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    BluRayRemux,
    BluRay,
    BdRip,
    BrRip,
    WebDl,
    WebRip,
    Web,
    HDTV,
    HdRip,
    DvdRip,
    DVD,
    Cam,
    TeleSync,
    TeleCine,
    Screener,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BluRayRemux => write!(f, "BluRay REMUX"),
            Self::BluRay => write!(f, "BluRay"),
            Self::BdRip => write!(f, "BDRip"),
            Self::BrRip => write!(f, "BRRip"),
            Self::WebDl => write!(f, "WEB-DL"),
            Self::WebRip => write!(f, "WEBRip"),
            Self::Web => write!(f, "WEB"),
            Self::HDTV => write!(f, "HDTV"),
            Self::HdRip => write!(f, "HDRip"),
            Self::DvdRip => write!(f, "DVDRip"),
            Self::DVD => write!(f, "DVD"),
            Self::Cam => write!(f, "CAM"),
            Self::TeleSync => write!(f, "TeleSync"),
            Self::TeleCine => write!(f, "TeleCine"),
            Self::Screener => write!(f, "SCR"),
        }
    }
}

/// Video codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCodec {
    Avc,
    Hevc,
    AV1,
    VP9,
    Xvid,
    Mpeg,
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Avc => write!(f, "avc"),
            Self::Hevc => write!(f, "hevc"),
            Self::AV1 => write!(f, "av1"),
            Self::VP9 => write!(f, "vp9"),
            Self::Xvid => write!(f, "xvid"),
            Self::Mpeg => write!(f, "mpeg"),
        }
    }
}

/// Audio codec or audio format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCodec {
    DtsHd,
    DtsX,
    DTS,
    TrueHD,
    Atmos,
    DolbyDigitalPlus,
    DolbyDigital,
    FLAC,
    AAC,
    Opus,
    MP3,
    Vorbis,
    PCM,
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DtsHd => write!(f, "DTS-HD"),
            Self::DtsX => write!(f, "DTS:X"),
            Self::DTS => write!(f, "DTS"),
            Self::TrueHD => write!(f, "TrueHD"),
            Self::Atmos => write!(f, "Atmos"),
            Self::DolbyDigitalPlus => write!(f, "Dolby Digital Plus"),
            Self::DolbyDigital => write!(f, "Dolby Digital"),
            Self::FLAC => write!(f, "FLAC"),
            Self::AAC => write!(f, "AAC"),
            Self::Opus => write!(f, "Opus"),
            Self::MP3 => write!(f, "MP3"),
            Self::Vorbis => write!(f, "Vorbis"),
            Self::PCM => write!(f, "PCM"),
        }
    }
}

/// High dynamic range format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdrFormat {
    DolbyVision,
    HDR10Plus,
    HDR,
    SDR,
}

impl fmt::Display for HdrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DolbyVision => write!(f, "DV"),
            Self::HDR10Plus => write!(f, "HDR10+"),
            Self::HDR => write!(f, "HDR"),
            Self::SDR => write!(f, "SDR"),
        }
    }
}
