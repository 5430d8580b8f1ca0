use super::error::HelpError;
use crate::i18n::{gettext, substitute};
use getopts::{Fail, Options, ParsingStyle};

/// Terminal width assumed when `COLUMNS` is unusable
pub const DEFAULT_COLUMNS: usize = 80;
/// Capacity of one listing cell
pub const LINE_BUFFER: usize = 128;
/// Column width used when half the terminal is too narrow to hold a cell
pub const FALLBACK_COLUMN_WIDTH: usize = 40;

/// How matching entries are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpFormat {
    /// `name - first line of the description`
    Description,
    /// NAME/SYNOPSIS/DESCRIPTION/SEE ALSO/IMPLEMENTATION sections
    Manpage,
    /// `name: synopsis` followed by the long documentation
    Full,
    /// `name: synopsis` only
    Synopsis,
}

/// Parsed `help [-dms] [pattern ...]` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpConfig {
    /// -d
    pub description: bool,
    /// -m
    pub manpage: bool,
    /// -s
    pub short_only: bool,
    pub patterns: Vec<String>,
}

impl HelpConfig {
    pub fn format(&self) -> HelpFormat {
        if self.description {
            HelpFormat::Description
        } else if self.manpage {
            HelpFormat::Manpage
        } else if self.short_only {
            HelpFormat::Synopsis
        } else {
            HelpFormat::Full
        }
    }
}

/// Parse the argument vector of `help`; `argv[0]` is the command name.
///
/// Flags must come before the first pattern, and `--` ends them.
pub fn parse_arguments(argv: &[String]) -> Result<HelpConfig, HelpError> {
    let mut opts = Options::new();
    opts.parsing_style(ParsingStyle::StopAtFirstFree);
    opts.optflagmulti("d", "", "output short description for each topic");
    opts.optflagmulti("m", "", "display usage in pseudo-manpage format");
    opts.optflagmulti("s", "", "output only a short usage synopsis");

    let args = argv.get(1..).unwrap_or(&[]);
    let matches = opts
        .parse(args)
        .map_err(|fail| HelpError::Usage(describe_failure(fail)))?;

    Ok(HelpConfig {
        description: matches.opt_present("d"),
        manpage: matches.opt_present("m"),
        short_only: matches.opt_present("s"),
        patterns: matches.free,
    })
}

fn describe_failure(fail: Fail) -> String {
    let option = match fail {
        Fail::UnrecognizedOption(opt) if opt.chars().count() == 1 => format!("-{opt}"),
        Fail::UnrecognizedOption(opt) => format!("--{opt}"),
        other => return other.to_string(),
    };
    substitute(&gettext("%s: invalid option"), &[option.as_str()])
}

/// Width of one column of the builtin listing.
///
/// `columns` is the raw `COLUMNS` value. The result is half the terminal,
/// at most [`LINE_BUFFER`], and [`FALLBACK_COLUMN_WIDTH`] when half the
/// terminal is 3 columns or less.
pub fn column_width(columns: Option<&str>) -> usize {
    let columns = columns
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|&value| value > 0)
        .map(|value| value as usize)
        .unwrap_or(DEFAULT_COLUMNS);

    let width = (columns / 2).min(LINE_BUFFER);
    if width <= 3 {
        FALLBACK_COLUMN_WIDTH
    } else {
        width
    }
}
