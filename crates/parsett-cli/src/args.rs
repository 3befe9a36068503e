use std::ffi::OsString;

use clap::Parser;

/// Parse a release title and print the result as JSON.
///
/// A title that looks like `--help` or `-V` is passed after `--`.
#[derive(Debug, Parser)]
#[command(name = "parse-title", version)]
pub struct SingleArgs {
    /// Release title to parse; arguments after the first are ignored
    #[arg(
        value_name = "TITLE",
        value_parser = clap::value_parser!(OsString),
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub titles: Vec<OsString>,
}

impl SingleArgs {
    /// Titles as text; bytes that are not valid UTF-8 become U+FFFD.
    pub fn titles(&self) -> Vec<String> {
        lossy_titles(&self.titles)
    }
}

/// Parse release titles and print a JSON array with one record per title.
///
/// A title that looks like `--help` or `-V` is passed after `--`.
#[derive(Debug, Parser)]
#[command(name = "parse-title-batch", version)]
pub struct BatchArgs {
    /// Release titles to parse, in output order
    #[arg(
        value_name = "TITLE",
        value_parser = clap::value_parser!(OsString),
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub titles: Vec<OsString>,
}

impl BatchArgs {
    /// Titles as text; bytes that are not valid UTF-8 become U+FFFD.
    pub fn titles(&self) -> Vec<String> {
        lossy_titles(&self.titles)
    }
}

fn lossy_titles(raw: &[OsString]) -> Vec<String> {
    raw.iter()
        .map(|title| title.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn single_accepts_no_title() {
        let args = SingleArgs::try_parse_from(["parse-title"]).unwrap();
        assert!(args.titles().is_empty());
    }

    #[test]
    fn single_keeps_extra_titles() {
        let args = SingleArgs::try_parse_from(["parse-title", "A.2020", "B.2021"]).unwrap();
        assert_eq!(args.titles(), vec!["A.2020", "B.2021"]);
    }

    #[test]
    fn batch_preserves_order_and_empty_titles() {
        let args =
            BatchArgs::try_parse_from(["parse-title-batch", "Z.2020", "", "A.2021"]).unwrap();
        assert_eq!(args.titles(), vec!["Z.2020", "", "A.2021"]);
    }

    #[test]
    fn titles_may_follow_a_hyphenated_title() {
        let args =
            BatchArgs::try_parse_from(["parse-title-batch", "Movie.2020", "-GROUP"]).unwrap();
        assert_eq!(args.titles(), vec!["Movie.2020", "-GROUP"]);
    }

    #[test]
    fn leading_help_flag_is_not_a_title() {
        let err = SingleArgs::try_parse_from(["parse-title", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = BatchArgs::try_parse_from(["parse-title-batch", "-V"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn flag_like_titles_pass_after_separator() {
        let args = SingleArgs::try_parse_from(["parse-title", "--", "--help"]).unwrap();
        assert_eq!(args.titles(), vec!["--help"]);

        let args = SingleArgs::try_parse_from(["parse-title", "--"]).unwrap();
        assert!(args.titles().is_empty());
    }

    #[test]
    fn flags_after_the_first_title_are_titles() {
        let args =
            BatchArgs::try_parse_from(["parse-title-batch", "A.2020", "--help", "-V"]).unwrap();
        assert_eq!(args.titles(), vec!["A.2020", "--help", "-V"]);
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_titles_are_accepted() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"Movie.\xff.2020.1080p");
        let argv = [OsStr::new("parse-title-batch"), OsStr::new("A.2020"), raw];
        let args = BatchArgs::try_parse_from(argv).unwrap();
        assert_eq!(args.titles(), vec!["A.2020", "Movie.\u{fffd}.2020.1080p"]);
    }
}
