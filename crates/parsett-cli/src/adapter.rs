//! The single-title and batch-title command adapters.
//!
//! Both take the positional titles, hand them to a [`TitleParser`] and write
//! one JSON line to either the output or the error stream. They are generic
//! over the parser and the two streams so they can run against buffers.

use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

use parsett_core::TitleParser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CliError;
use crate::lossy;
use crate::output::write_line;

/// How an adapter run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// `{"error": "..."}` written to the error stream.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub error: &'a str,
}

/// Error recorded for a title whose parse result converted to `null`.
pub const NULL_RESULT: &str = "parser returned no result";

/// Per-title record of a batch run. Exactly one of `parsed` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub title: String,
    pub parsed: Option<Value>,
    pub error: Option<String>,
}

impl BatchItem {
    /// Folds the outcome of parsing `title` into a record.
    ///
    /// A success that converted to `null` is recorded as an error, so the
    /// record never has both sides empty.
    pub fn from_outcome(title: impl Into<String>, outcome: Result<Value, String>) -> Self {
        let title = title.into();
        match outcome {
            Ok(Value::Null) => Self {
                title,
                parsed: None,
                error: Some(NULL_RESULT.to_string()),
            },
            Ok(parsed) => Self {
                title,
                parsed: Some(parsed),
                error: None,
            },
            Err(error) => Self {
                title,
                parsed: None,
                error: Some(error),
            },
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.parsed.is_some()
    }
}

fn write_envelope<E: Write>(err: &mut E, message: &str) -> Result<(), CliError> {
    write_line(err, &ErrorEnvelope { error: message })
}

/// Parses the first title; extra titles are ignored.
///
/// The result goes to `out` on success. A missing title or a parser failure
/// goes to `err` as an error envelope and yields [`Status::Failure`].
///
/// # Errors
///
/// Only fails when writing to one of the streams fails.
pub fn run_single<P, O, E>(
    parser: &P,
    titles: &[String],
    out: &mut O,
    err: &mut E,
) -> Result<Status, CliError>
where
    P: TitleParser,
    O: Write,
    E: Write,
{
    let Some(title) = titles.first() else {
        write_envelope(err, &CliError::NoTitle.to_string())?;
        return Ok(Status::Failure);
    };
    if titles.len() > 1 {
        debug!(ignored = titles.len() - 1, "extra titles ignored");
    }

    match parser.parse_title(title) {
        Ok(parsed) => {
            write_line(out, &lossy::to_value(&parsed))?;
            Ok(Status::Success)
        }
        Err(error) => {
            let message = error.to_string();
            debug!(title = %title, error = %message, "title failed to parse");
            write_envelope(err, &message)?;
            Ok(Status::Failure)
        }
    }
}

/// Parses every title in order; a failure is recorded on its own item.
pub fn parse_batch<P: TitleParser>(parser: &P, titles: &[String]) -> Vec<BatchItem> {
    titles
        .iter()
        .map(|title| {
            let outcome = parser
                .parse_title(title)
                .map(|parsed| lossy::to_value(&parsed))
                .map_err(|error| error.to_string());
            if let Err(message) = &outcome {
                warn!(title = %title, error = %message, "title failed to parse");
            }
            BatchItem::from_outcome(title.as_str(), outcome)
        })
        .collect()
}

/// Parses all titles and writes the records as one JSON array to `out`.
///
/// Per-title failures still end in [`Status::Success`]; only a missing title
/// list is a failure, reported on `err`.
///
/// # Errors
///
/// Only fails when writing to one of the streams fails.
pub fn run_batch<P, O, E>(
    parser: &P,
    titles: &[String],
    out: &mut O,
    err: &mut E,
) -> Result<Status, CliError>
where
    P: TitleParser,
    O: Write,
    E: Write,
{
    if titles.is_empty() {
        write_envelope(err, &CliError::NoTitles.to_string())?;
        return Ok(Status::Failure);
    }

    let items = parse_batch(parser, titles);
    let failed = items.iter().filter(|item| !item.is_success()).count();
    debug!(total = items.len(), failed, "batch parsed");

    write_line(out, &items)?;
    Ok(Status::Success)
}

/// Indexes decoded batch records by title, `None` for titles that failed.
///
/// When a title appears more than once, the last record wins.
pub fn index_by_title(items: &[BatchItem]) -> HashMap<&str, Option<&Value>> {
    items
        .iter()
        .map(|item| (item.title.as_str(), item.parsed.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use parsett_core::HeuristicParser;
    use serde_json::json;

    use super::*;

    /// Deterministic stand-in for a real parser.
    struct StubParser;

    impl TitleParser for StubParser {
        type Output = Value;
        type Error = String;

        fn parse_title(&self, title: &str) -> Result<Value, String> {
            match title {
                "The.Matrix.1999.1080p" => Ok(json!({
                    "title": "The Matrix",
                    "year": 1999,
                    "resolution": "1080p",
                })),
                "boom" => Err("parser exploded".to_string()),
                other => Ok(json!({ "title": other })),
            }
        }
    }

    /// Returns values JSON has no native form for.
    struct ExoticParser;

    impl TitleParser for ExoticParser {
        type Output = BTreeMap<u32, f64>;
        type Error = String;

        fn parse_title(&self, _title: &str) -> Result<Self::Output, String> {
            Ok(BTreeMap::from([(1, f64::NAN), (2, 0.5)]))
        }
    }

    /// Succeeds with a value that converts to `null`.
    struct UnitParser;

    impl TitleParser for UnitParser {
        type Output = ();
        type Error = String;

        fn parse_title(&self, _title: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn run<F>(f: F) -> (Status, String, String)
    where
        F: FnOnce(&mut Vec<u8>, &mut Vec<u8>) -> Result<Status, CliError>,
    {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = f(&mut out, &mut err).unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn single_without_title_reports_usage_error() {
        let (status, out, err) = run(|o, e| run_single(&StubParser, &[], o, e));
        assert_eq!(status, Status::Failure);
        assert_eq!(out, "");
        assert_eq!(err, "{\"error\": \"No title provided\"}\n");
    }

    #[test]
    fn single_success_prints_result() {
        let input = titles(&["The.Matrix.1999.1080p"]);
        let (status, out, err) = run(|o, e| run_single(&StubParser, &input, o, e));
        assert_eq!(status, Status::Success);
        assert_eq!(
            out,
            "{\"title\": \"The Matrix\", \"year\": 1999, \"resolution\": \"1080p\"}\n"
        );
        assert_eq!(err, "");
    }

    #[test]
    fn single_ignores_extra_titles() {
        let input = titles(&["The.Matrix.1999.1080p", "boom"]);
        let (status, out, _) = run(|o, e| run_single(&StubParser, &input, o, e));
        assert_eq!(status, Status::Success);
        assert!(out.starts_with("{\"title\": \"The Matrix\""));
    }

    #[test]
    fn single_failure_prints_envelope() {
        let input = titles(&["boom"]);
        let (status, out, err) = run(|o, e| run_single(&StubParser, &input, o, e));
        assert_eq!(status, Status::Failure);
        assert_eq!(out, "");
        assert_eq!(err, "{\"error\": \"parser exploded\"}\n");
    }

    #[test]
    fn single_stringifies_unrepresentable_values() {
        let input = titles(&["anything"]);
        let (status, out, _) = run(|o, e| run_single(&ExoticParser, &input, o, e));
        assert_eq!(status, Status::Success);
        assert_eq!(out, "{\"1\": \"NaN\", \"2\": 0.5}\n");
    }

    #[test]
    fn batch_without_titles_reports_usage_error() {
        let (status, out, err) = run(|o, e| run_batch(&StubParser, &[], o, e));
        assert_eq!(status, Status::Failure);
        assert_eq!(out, "");
        assert_eq!(err, "{\"error\": \"No titles provided\"}\n");
    }

    #[test]
    fn batch_records_failures_inline() {
        let input = titles(&["The.Matrix.1999.1080p", "boom"]);
        let (status, out, err) = run(|o, e| run_batch(&StubParser, &input, o, e));
        assert_eq!(status, Status::Success);
        assert_eq!(err, "");
        assert_eq!(
            out,
            concat!(
                "[{\"title\": \"The.Matrix.1999.1080p\", ",
                "\"parsed\": {\"title\": \"The Matrix\", \"year\": 1999, \"resolution\": \"1080p\"}, ",
                "\"error\": null}, ",
                "{\"title\": \"boom\", \"parsed\": null, \"error\": \"parser exploded\"}]\n"
            )
        );
    }

    #[test]
    fn batch_all_failures_still_succeed() {
        let input = titles(&["boom", "boom"]);
        let (status, out, _) = run(|o, e| run_batch(&StubParser, &input, o, e));
        assert_eq!(status, Status::Success);
        let items: Vec<BatchItem> = serde_json::from_str(&out).unwrap();
        assert!(items.iter().all(|item| !item.is_success()));
    }

    #[test]
    fn batch_preserves_length_and_order() {
        let input = titles(&["c", "boom", "a", "b", "boom"]);
        let items = parse_batch(&StubParser, &input);

        assert_eq!(items.len(), input.len());
        for (item, title) in items.iter().zip(&input) {
            assert_eq!(&item.title, title);
            assert_ne!(item.parsed.is_some(), item.error.is_some());
        }
    }

    #[test]
    fn batch_output_is_byte_identical_across_runs() {
        let input = titles(&["The.Matrix.1999.1080p", "boom", "x"]);
        let first = run(|o, e| run_batch(&StubParser, &input, o, e));
        let second = run(|o, e| run_batch(&StubParser, &input, o, e));
        assert_eq!(first, second);
    }

    #[test]
    fn batch_with_heuristic_parser() {
        let parser = HeuristicParser::new().unwrap();
        let input = titles(&["Game.of.Thrones.S08E06.1080p.WEB.H264-MEMENTO", "   "]);
        let items = parse_batch(&parser, &input);

        let parsed = items[0].parsed.as_ref().unwrap();
        assert_eq!(parsed["title"], "Game of Thrones");
        assert_eq!(parsed["seasons"], json!([8]));
        assert_eq!(parsed["episodes"], json!([6]));
        assert!(items[0].error.is_none());

        assert!(items[1].parsed.is_none());
        assert_eq!(
            items[1].error.as_deref(),
            Some("input is empty or whitespace-only")
        );
    }

    #[test]
    fn from_outcome_sets_exactly_one_side() {
        let ok = BatchItem::from_outcome("a", Ok(json!({"title": "a"})));
        assert!(ok.is_success());
        assert!(ok.error.is_none());

        let failed = BatchItem::from_outcome("b", Err("bad".into()));
        assert!(!failed.is_success());
        assert_eq!(failed.error.as_deref(), Some("bad"));
    }

    #[test]
    fn null_result_is_recorded_as_error() {
        let input = titles(&["anything"]);
        let (status, out, _) = run(|o, e| run_batch(&UnitParser, &input, o, e));
        assert_eq!(status, Status::Success);
        assert_eq!(
            out,
            "[{\"title\": \"anything\", \"parsed\": null, \"error\": \"parser returned no result\"}]\n"
        );

        let item = BatchItem::from_outcome("x", Ok(Value::Null));
        assert!(!item.is_success());
        assert_eq!(item.error.as_deref(), Some(NULL_RESULT));
    }

    #[test]
    fn index_by_title_maps_failures_to_none() {
        let items = vec![
            BatchItem::from_outcome("a", Ok(json!({"title": "A"}))),
            BatchItem::from_outcome("b", Err("bad".into())),
        ];
        let index = index_by_title(&items);

        assert_eq!(index.len(), 2);
        assert_eq!(index["a"], Some(&json!({"title": "A"})));
        assert_eq!(index["b"], None);
    }
}
