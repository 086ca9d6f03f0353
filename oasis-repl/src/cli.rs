use clap::{Parser, ValueEnum};
use oasis_compute::{symbolic::simplify::DEFAULT_MAX_PASSES, MarkupFormat};
use std::path::PathBuf;

/// Simplify, differentiate and integrate expressions exactly.
///
/// Without a file, lines are read from standard input if it is not a terminal; otherwise an
/// interactive session is started.
#[derive(Debug, Parser)]
#[command(name = "oasis", version)]
pub struct Cli {
    /// A file whose lines are submitted in order.
    pub file: Option<PathBuf>,

    /// The markup used to show expressions.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// How many passes the simplifier may run on one expression.
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    pub max_passes: usize,

    /// Log filter, such as `debug` or `oasis_session=trace`.
    #[arg(long, env = "OASIS_LOG", default_value = "warn")]
    pub log: String,
}

/// The markup used to show expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Plain text that can be typed back in.
    Text,

    /// Presentation MathML.
    Mathml,
}

impl From<Format> for MarkupFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => MarkupFormat::Text,
            Format::Mathml => MarkupFormat::MathMl,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["oasis"]).unwrap();
        assert_eq!(cli.file, None);
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.max_passes, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from(["oasis", "--format", "mathml", "--max-passes", "8", "input.txt"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("input.txt")));
        assert_eq!(MarkupFormat::from(cli.format), MarkupFormat::MathMl);
        assert_eq!(cli.max_passes, 8);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["oasis", "--format", "latex"]).is_err());
    }
}
