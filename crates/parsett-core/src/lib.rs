//! # Parsett Core
//!
//! Release title parsing for torrent and media file names. Provides the
//! [`TitleParser`] capability, a regex driven [`HeuristicParser`]
//! implementing it, and the structured [`ParsedTitle`] it produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use parsett_core::{HeuristicParser, Resolution};
//!
//! let parser = HeuristicParser::new().unwrap();
//! let result = parser.parse("The.Matrix.1999.1080p.BluRay.x264-SPARKS.mkv").unwrap();
//!
//! assert_eq!(result.title, "The Matrix");
//! assert_eq!(result.year, Some(1999));
//! assert_eq!(result.resolution, Some(Resolution::FHD1080));
//! assert_eq!(result.group.as_deref(), Some("SPARKS"));
//! ```
pub mod error;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{ParsettError, Result};
pub use parser::{HeuristicParser, TitleParser};
pub use types::{AudioCodec, HdrFormat, ParsedTitle, Quality, Resolution, VideoCodec};
