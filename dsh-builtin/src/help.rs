use super::ShellProxy;
use crate::i18n::ngettext;
use crate::version::shell_version;
use dsh_types::{Context, ExitStatus};
use std::io::{BufWriter, Write};
use tracing::{debug, warn};

pub mod config;
pub mod error;
pub mod format;
pub mod helpfile;
pub mod matcher;
pub mod summary;


use config::{HelpConfig, HelpFormat, column_width, parse_arguments};
use error::HelpError;
use format::{show_desc, show_longdoc, show_manpage, show_synopsis};
use matcher::{TopicMatcher, is_glob_pattern};
use summary::{Listing, show_builtin_command_help};

pub const COMMAND_NAME: &str = "help";

const USAGE: &str = "help [-dms] [pattern ...]";

/// Exit status of a command stopped by an interrupt
const INTERRUPTED: ExitStatus = ExitStatus::ExitedWith(130);

/// Built-in help command implementation
/// With no patterns, lists every builtin; otherwise prints the documentation
/// of each builtin whose name matches one of the patterns
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let mut out = BufWriter::new(ctx.stdout());
    let mut err = ctx.stderr();

    match run(&mut out, &mut err, &argv, proxy) {
        Ok(status) => status,
        Err(e) => {
            let _ = out.flush();
            let _ = writeln!(err, "{}: {}", COMMAND_NAME, e.user_message());
            if let HelpError::Usage(_) = e {
                let _ = writeln!(err, "{}: usage: {}", COMMAND_NAME, USAGE);
            }
            e.exit_status()
        }
    }
}

fn run(
    out: &mut dyn Write,
    err: &mut dyn Write,
    argv: &[String],
    proxy: &mut dyn ShellProxy,
) -> Result<ExitStatus, HelpError> {
    let config = parse_arguments(argv)?;
    debug!("help: {:?}", config);

    if config.patterns.is_empty() {
        let width = column_width(proxy.get_var("COLUMNS").as_deref());
        writeln!(out, "{}", shell_version())?;
        let listing = show_builtin_command_help(out, &*proxy, width)?;
        out.flush()?;
        return Ok(match listing {
            Listing::Complete => ExitStatus::SUCCESS,
            Listing::Canceled => INTERRUPTED,
        });
    }

    show_matching(out, err, &config, &*proxy)
}

fn show_matching(
    out: &mut dyn Write,
    err: &mut dyn Write,
    config: &HelpConfig,
    proxy: &dyn ShellProxy,
) -> Result<ExitStatus, HelpError> {
    let registry = proxy.builtin_registry();
    let format = config.format();

    if is_glob_pattern(&config.patterns[0]) {
        let count = if config.patterns.len() > 1 { 2 } else { 1 };
        write!(
            out,
            "{}",
            ngettext(
                "Shell commands matching keyword `",
                "Shell commands matching keywords `",
                count
            )
        )?;
        write!(out, "{}", config.patterns.join(", "))?;
        write!(out, "'\n\n")?;
    }

    let mut match_found = 0usize;
    let mut pattern = "";
    for topic in &config.patterns {
        pattern = topic.as_str();
        let matcher = TopicMatcher::new(topic);

        for entry in registry.entries() {
            if proxy.is_canceled() {
                debug!("help canceled while matching `{}'", topic);
                out.flush()?;
                return Ok(INTERRUPTED);
            }
            if !matcher.matches(&entry.name) {
                continue;
            }
            match_found += 1;

            let shown = match format {
                HelpFormat::Description => show_desc(out, entry),
                HelpFormat::Manpage => show_manpage(out, entry),
                HelpFormat::Synopsis => show_synopsis(out, entry),
                HelpFormat::Full => {
                    show_synopsis(out, entry).and_then(|_| show_longdoc(out, entry))
                }
            };

            match shown {
                Ok(()) => {}
                Err(e) if e.is_entry_local() => {
                    warn!("help: skipping {}: {}", entry.name, e);
                    out.flush()?;
                    writeln!(err, "{}: {}", COMMAND_NAME, e.user_message())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    debug!("help: {} topics matched", match_found);
    if match_found == 0 {
        return Err(HelpError::NoMatch {
            pattern: pattern.to_string(),
        });
    }

    out.flush()?;
    Ok(ExitStatus::SUCCESS)
}
