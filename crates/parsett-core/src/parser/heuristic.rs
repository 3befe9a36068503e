use regex::{Match, Regex};
use tracing::{debug, trace};

use crate::error::{ParsettError, Result};
use crate::parser::TitleParser;
use crate::types::{AudioCodec, HdrFormat, ParsedTitle, Quality, Resolution, VideoCodec};

/// Heuristic parser using optimized regex patterns and scene naming rules.
///
/// Works in two passes. Primary markers (resolution, source, codec,
/// season/episode numbering, edition flags, year) locate the end of the
/// title; secondary markers (audio, channels, HDR, bit depth, languages) are
/// only read from the text after it, so words such as "Opus" or "Italian"
/// inside a title are left alone.
pub struct HeuristicParser {
    re_site: Regex,
    re_group_prefix: Regex,
    re_container: Regex,
    re_group_suffix: Regex,
    re_resolution: Regex,
    re_quality: Regex,
    re_vcodec: Regex,
    re_season_episode: Regex,
    re_cross_episode: Regex,
    re_season: Regex,
    re_season_word: Regex,
    re_episode_dash: Regex,
    re_episode_word: Regex,
    re_extended: Regex,
    re_hardcoded: Regex,
    re_proper: Regex,
    re_repack: Regex,
    re_year: Regex,
    re_brackets: Regex,
    re_acodec: Regex,
    re_channels: Regex,
    re_hdr: Regex,
    re_bit_depth: Regex,
    re_language: Regex,
}

/// Returns the whole match together with the text of the first capture group.
fn capture_first<'h>(re: &Regex, haystack: &'h str) -> Option<(Match<'h>, &'h str)> {
    let caps = re.captures(haystack)?;
    Some((caps.get(0)?, caps.get(1)?.as_str()))
}

/// Expands `start` and an optional inclusive `end` into a list of numbers.
fn number_span(start: &str, end: Option<&str>) -> Vec<u32> {
    let Ok(start) = start.parse::<u32>() else {
        return Vec::new();
    };
    match end.and_then(|e| e.parse::<u32>().ok()) {
        Some(end) if end > start => (start..=end).collect(),
        _ => vec![start],
    }
}

fn is_year_like(number: &str) -> bool {
    number.len() == 4 && (number.starts_with("19") || number.starts_with("20"))
}

fn clean_title(region: &str) -> String {
    region
        .replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '-' | ' ' | '(' | '[' | ','))
        .to_string()
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Season/episode numbering found in a title, with the offset where it starts.
#[derive(Debug, Default)]
struct Numbering {
    seasons: Vec<u32>,
    episodes: Vec<u32>,
    starts: Vec<usize>,
}

impl HeuristicParser {
    /// Constructs a new `HeuristicParser` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ParsettError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_site: Regex::new(
                r"(?i)^\[?\s*(www\.[a-z0-9-]+\.[a-z]{2,})\s*\]?\s*(?:-\s*)?",
            )?,
            re_group_prefix: Regex::new(r"^\[([^\]]+)\]\s*")?,
            re_container: Regex::new(
                r"(?i)\.(mkv|mp4|avi|m4v|wmv|mov|webm|flv|mpe?g|m2ts|ts|iso)$",
            )?,
            re_group_suffix: Regex::new(r"-([A-Za-z0-9]+)\s*$")?,
            re_resolution: Regex::new(
                r"(?i)\b(?:(2160|1440|1080|720|576|480|360)[pi]|\d{3,4}x(2160|1440|1080|720|576|480|360)|(4k|uhd))\b",
            )?,
            re_quality: Regex::new(
                r"(?i)\b(blu-?ray[ .-]?remux|bd-?remux|remux|bdrip|brrip|blu-?ray|bd|web-?dl|web-?rip|web|hdtv|hdrip|dvd-?rip|dvd|hdcam|cam(?:-?rip)?|telesync|hdts|telecine|screener|scr)\b",
            )?,
            re_vcodec: Regex::new(
                r"(?i)\b(x\.?264|x\.?265|h\.?264|h\.?265|avc|hevc|av1|vp9|xvid|divx|mpeg-?[24])\b",
            )?,
            re_season_episode: Regex::new(
                r"(?i)\bS(\d{1,2})[ .]?E(\d{1,4})(?:(?:-|-?E)(\d{1,4}))?",
            )?,
            re_cross_episode: Regex::new(r"(?i)\b(\d{1,2})x(\d{2,3})\b")?,
            re_season: Regex::new(r"(?i)\bS(\d{1,2})(?:-S?(\d{1,2}))?\b")?,
            re_season_word: Regex::new(
                r"(?i)\bseasons?[ ._]?(\d{1,2})(?:[ ._]?-[ ._]?(\d{1,2}))?\b",
            )?,
            re_episode_dash: Regex::new(
                r"(?:^|\s)-\s?(\d{1,4})(?:\s?[-~]\s?(\d{1,4}))?(?:v\d)?(?:[\s\[\(._]|$)",
            )?,
            re_episode_word: Regex::new(r"(?i)\b(?:episode|ep)[ .]?(\d{1,4})\b")?,
            re_extended: Regex::new(r"(?i)\bextended\b")?,
            re_hardcoded: Regex::new(r"(?i)\b(?:hc|hard-?coded|hard-?subs?)\b")?,
            re_proper: Regex::new(r"(?i)\b(?:real[ .])?proper\b")?,
            re_repack: Regex::new(r"(?i)\b(?:repack|rerip)\b")?,
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
            re_brackets: Regex::new(r"\[[^\]]*\]")?,
            re_acodec: Regex::new(
                r"(?i)\b(dts[ .-]?hd(?:[ .-]?ma)?|dts[ .:-]?x|dts|true[ .-]?hd|atmos|dd\+|ddp|e-?ac-?3|dolby[ .]?digital[ .]?plus|dolby[ .]?digital|dd|ac-?3|flac|aac|opus|mp3|vorbis|l?pcm)(?:[^a-z0-9]|\d\.\d|$)",
            )?,
            re_channels: Regex::new(r"(?:^|[^\d.])([2578])\.([01])(?:ch)?\b")?,
            re_hdr: Regex::new(
                r"(?i)\b(dolby[ .]?vision|dovi|dv|hdr10(?:\+|plus)|hdr(?:10)?|sdr)(?:[^a-z0-9]|$)",
            )?,
            re_bit_depth: Regex::new(r"(?i)\b(?:(8|10|12)[ .-]?bits?|hi(10)p?)\b")?,
            re_language: Regex::new(
                r"(?i)\b(multi(?:[ .-]?(?:audio|subs?|lang))?|english|eng|vostfr|truefrench|french|vff|german|ger|deutsch|spanish|castellano|spa|esp|latino|italian|ita|japanese|jpn|korean|kor|russian|rus|portuguese|por|hindi|hin|chinese|mandarin|chi)\b",
            )?,
        })
    }

    /// Parses the given release title using heuristic regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ParsettError::EmptyInput` if the input is empty or
    /// whitespace-only, and `ParsettError::ParseFailed` if nothing is left
    /// for the title once metadata tokens are removed.
    pub fn parse(&self, input: &str) -> Result<ParsedTitle> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParsettError::EmptyInput);
        }

        let mut result = ParsedTitle::default();
        let mut body = trimmed;

        // Wrappers around the release name, outermost first
        if let Some((whole, site)) = capture_first(&self.re_site, body) {
            result.site = Some(site.to_string());
            body = &body[whole.end()..];
        }
        if let Some((whole, group)) = capture_first(&self.re_group_prefix, body) {
            result.group = Some(group.trim().to_string());
            body = &body[whole.end()..];
        }
        if let Some((whole, container)) = capture_first(&self.re_container, body) {
            result.container = Some(container.to_lowercase());
            body = &body[..whole.start()];
        }
        if result.group.is_none() {
            if let Some((whole, group)) = capture_first(&self.re_group_suffix, body) {
                if self.has_primary_marker(&body[..whole.start()]) {
                    result.group = Some(group.to_string());
                    body = &body[..whole.start()];
                }
            }
        }

        // Primary markers: each one found bounds the title from the right
        let mut starts = Vec::new();
        if let Some((resolution, at)) = self.extract_resolution(body) {
            result.resolution = Some(resolution);
            starts.push(at);
        }
        if let Some((quality, at)) = self.extract_quality(body) {
            result.quality = Some(quality);
            starts.push(at);
        }
        if let Some((codec, at)) = self.extract_video_codec(body) {
            result.codec = Some(codec);
            starts.push(at);
        }
        let numbering = self.extract_numbering(body);
        result.seasons = numbering.seasons;
        result.episodes = numbering.episodes;
        starts.extend(numbering.starts);

        for (flag, re) in [
            (&mut result.extended, &self.re_extended),
            (&mut result.hardcoded, &self.re_hardcoded),
            (&mut result.proper, &self.re_proper),
            (&mut result.repack, &self.re_repack),
        ] {
            if let Some(m) = re.find(body) {
                *flag = true;
                starts.push(m.start());
            }
        }

        if let Some((year, at)) = self.extract_year(body) {
            result.year = Some(year);
            starts.push(at);
        }

        let title_end = starts.into_iter().min().unwrap_or(body.len());
        result.title = self.extract_title(&body[..title_end]);
        if result.title.is_empty() {
            return Err(ParsettError::ParseFailed {
                input: trimmed.to_string(),
            });
        }

        // Secondary markers, read only after the title
        let tail = &body[title_end..];
        result.audio = self.extract_audio(tail);
        result.channels = self.extract_channels(tail);
        result.hdr = self.extract_hdr(tail);
        result.bit_depth = self.extract_bit_depth(tail);
        result.languages = self.extract_languages(tail);

        debug!(input = trimmed, title = %result.title, "parsed release title");
        trace!(?result, "extracted fields");

        Ok(result)
    }

    /// Whether `text` holds anything that only appears after a title.
    fn has_primary_marker(&self, text: &str) -> bool {
        self.re_resolution.is_match(text)
            || self.re_quality.is_match(text)
            || self.re_vcodec.is_match(text)
            || self.re_season_episode.is_match(text)
            || self.re_year.find_iter(text).any(|m| m.start() > 0)
    }

    fn extract_resolution(&self, input: &str) -> Option<(Resolution, usize)> {
        let caps = self.re_resolution.captures(input)?;
        let at = caps.get(0)?.start();
        let resolution = match (caps.get(1).or_else(|| caps.get(2)), caps.get(3)) {
            (Some(height), _) => Resolution::from_height(height.as_str())?,
            (None, Some(_)) => Resolution::UHD2160,
            (None, None) => return None,
        };
        Some((resolution, at))
    }

    fn extract_quality(&self, input: &str) -> Option<(Quality, usize)> {
        let (whole, tag) = capture_first(&self.re_quality, input)?;
        let tag = tag.to_lowercase().replace([' ', '.', '-'], "");
        let quality = match tag.as_str() {
            s if s.contains("remux") => Quality::BluRayRemux,
            "bdrip" => Quality::BdRip,
            "brrip" => Quality::BrRip,
            "bluray" | "bd" => Quality::BluRay,
            "webdl" => Quality::WebDl,
            "webrip" => Quality::WebRip,
            "web" => Quality::Web,
            "hdtv" => Quality::HDTV,
            "hdrip" => Quality::HdRip,
            "dvdrip" => Quality::DvdRip,
            "dvd" => Quality::DVD,
            s if s.contains("cam") => Quality::Cam,
            "telesync" | "hdts" => Quality::TeleSync,
            "telecine" => Quality::TeleCine,
            "screener" | "scr" => Quality::Screener,
            _ => return None,
        };
        Some((quality, whole.start()))
    }

    fn extract_video_codec(&self, input: &str) -> Option<(VideoCodec, usize)> {
        let (whole, tag) = capture_first(&self.re_vcodec, input)?;
        let tag = tag.to_lowercase();
        let codec = match tag.as_str() {
            s if s.ends_with("264") || s == "avc" => VideoCodec::Avc,
            s if s.ends_with("265") || s == "hevc" => VideoCodec::Hevc,
            "av1" => VideoCodec::AV1,
            "vp9" => VideoCodec::VP9,
            "xvid" | "divx" => VideoCodec::Xvid,
            s if s.starts_with("mpeg") => VideoCodec::Mpeg,
            _ => return None,
        };
        Some((codec, whole.start()))
    }

    fn extract_numbering(&self, input: &str) -> Numbering {
        let mut numbering = Numbering::default();

        // "S01E02", "S01E01-E03", "S01E01E02"
        if let Some(caps) = self.re_season_episode.captures(input) {
            numbering.seasons = number_span(&caps[1], None);
            numbering.episodes = number_span(&caps[2], caps.get(3).map(|m| m.as_str()));
            numbering.starts.extend(caps.get(0).map(|m| m.start()));
            return numbering;
        }

        // "1x05"
        if let Some(caps) = self.re_cross_episode.captures(input) {
            numbering.seasons = number_span(&caps[1], None);
            numbering.episodes = number_span(&caps[2], None);
            numbering.starts.extend(caps.get(0).map(|m| m.start()));
            return numbering;
        }

        // "S02", "S01-S03", "Season 2", "Seasons 1-4"
        let season = [&self.re_season, &self.re_season_word]
            .into_iter()
            .filter_map(|re| re.captures(input))
            .min_by_key(|caps| caps.get(0).map_or(usize::MAX, |m| m.start()));
        if let Some(caps) = season {
            numbering.seasons = number_span(&caps[1], caps.get(2).map(|m| m.as_str()));
            numbering.starts.extend(caps.get(0).map(|m| m.start()));
        }

        // " - 24", " - 01-12", " - 28v2"; a lone year after a dash is not an episode
        let dash = self.re_episode_dash.captures_iter(input).find(|caps| {
            caps.get(2).is_some() || !is_year_like(&caps[1])
        });
        if let Some(caps) = dash.or_else(|| self.re_episode_word.captures(input)) {
            numbering.episodes = number_span(&caps[1], caps.get(2).map(|m| m.as_str()));
            numbering.starts.extend(caps.get(0).map(|m| m.start()));
        }

        numbering
    }

    /// Picks the last year-like token that does not open the title, so
    /// "2001.A.Space.Odyssey.1968" resolves to 1968.
    fn extract_year(&self, input: &str) -> Option<(u16, usize)> {
        self.re_year
            .find_iter(input)
            .filter(|m| m.start() > 0)
            .last()
            .and_then(|m| Some((m.as_str().parse().ok()?, m.start())))
    }

    fn extract_title(&self, region: &str) -> String {
        let without_tags = self.re_brackets.replace_all(region, " ");
        clean_title(&without_tags)
    }

    fn extract_audio(&self, input: &str) -> Vec<AudioCodec> {
        let mut audio = Vec::new();
        for caps in self.re_acodec.captures_iter(input) {
            let tag = caps[1].to_lowercase().replace([' ', '.', '-', ':'], "");
            let codec = match tag.as_str() {
                s if s.starts_with("dtshd") => AudioCodec::DtsHd,
                "dtsx" => AudioCodec::DtsX,
                "dts" => AudioCodec::DTS,
                "truehd" => AudioCodec::TrueHD,
                "atmos" => AudioCodec::Atmos,
                "dd+" | "ddp" | "eac3" | "dolbydigitalplus" => AudioCodec::DolbyDigitalPlus,
                "dd" | "ac3" | "dolbydigital" => AudioCodec::DolbyDigital,
                "flac" => AudioCodec::FLAC,
                "aac" => AudioCodec::AAC,
                "opus" => AudioCodec::Opus,
                "mp3" => AudioCodec::MP3,
                "vorbis" => AudioCodec::Vorbis,
                "pcm" | "lpcm" => AudioCodec::PCM,
                _ => continue,
            };
            push_unique(&mut audio, codec);
        }
        audio
    }

    fn extract_channels(&self, input: &str) -> Vec<String> {
        let mut channels = Vec::new();
        for caps in self.re_channels.captures_iter(input) {
            push_unique(&mut channels, format!("{}.{}", &caps[1], &caps[2]));
        }
        channels
    }

    fn extract_hdr(&self, input: &str) -> Vec<HdrFormat> {
        let mut hdr = Vec::new();
        for caps in self.re_hdr.captures_iter(input) {
            let tag = caps[1].to_lowercase();
            let format = match tag.as_str() {
                "dv" | "dovi" => HdrFormat::DolbyVision,
                s if s.starts_with("dolby") => HdrFormat::DolbyVision,
                s if s.starts_with("hdr10") && s.len() > 5 => HdrFormat::HDR10Plus,
                "sdr" => HdrFormat::SDR,
                _ => HdrFormat::HDR,
            };
            push_unique(&mut hdr, format);
        }
        hdr
    }

    fn extract_bit_depth(&self, input: &str) -> Option<String> {
        let caps = self.re_bit_depth.captures(input)?;
        let depth = caps.get(1).or_else(|| caps.get(2))?;
        Some(format!("{}bit", depth.as_str()))
    }

    fn extract_languages(&self, input: &str) -> Vec<String> {
        let mut languages = Vec::new();
        for caps in self.re_language.captures_iter(input) {
            let tag = caps[1].to_lowercase();
            let code = match tag.as_str() {
                s if s.starts_with("multi") => "multi",
                "english" | "eng" => "en",
                "vostfr" | "truefrench" | "french" | "vff" => "fr",
                "german" | "ger" | "deutsch" => "de",
                "spanish" | "castellano" | "spa" | "esp" => "es",
                "latino" => "la",
                "italian" | "ita" => "it",
                "japanese" | "jpn" => "ja",
                "korean" | "kor" => "ko",
                "russian" | "rus" => "ru",
                "portuguese" | "por" => "pt",
                "hindi" | "hin" => "hi",
                "chinese" | "mandarin" | "chi" => "zh",
                _ => continue,
            };
            push_unique(&mut languages, code.to_string());
        }
        languages
    }
}

impl TitleParser for HeuristicParser {
    type Output = ParsedTitle;
    type Error = ParsettError;

    fn parse_title(&self, title: &str) -> Result<ParsedTitle> {
        self.parse(title)
    }
}
