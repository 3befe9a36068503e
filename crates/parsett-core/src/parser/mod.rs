pub mod heuristic;

pub use heuristic::HeuristicParser;

use std::fmt::Display;

use serde::Serialize;

/// A capability that turns a raw release title into structured metadata.
///
/// Callers treat the output as opaque: it only has to be serializable, and
/// failures only have to render a human readable message.
pub trait TitleParser {
    /// Structured result of a successful parse.
    type Output: Serialize;

    /// Failure reported for a title that could not be parsed.
    type Error: Display;

    /// Parses a single title.
    fn parse_title(&self, title: &str) -> std::result::Result<Self::Output, Self::Error>;
}

impl<P: TitleParser + ?Sized> TitleParser for &P {
    type Output = P::Output;
    type Error = P::Error;

    fn parse_title(&self, title: &str) -> std::result::Result<Self::Output, Self::Error> {
        (**self).parse_title(title)
    }
}
