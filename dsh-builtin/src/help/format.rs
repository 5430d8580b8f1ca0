//! Per-entry output of the help command.

use super::error::HelpError;
use super::helpfile::{read_helpfile, stream_helpfile};
use crate::i18n::gettext;
use crate::registry::{BuiltinEntry, LongDoc};
use crate::version::{COPYRIGHT, LICENSE, SHELL_NAME, shell_version};
use std::borrow::Cow;
use std::io::Write;

/// Indentation of documentation lines
pub const BASE_INDENT: usize = 4;

/// Text up to and including the first line terminator.
fn first_line(text: &[u8]) -> &[u8] {
    match text.iter().position(|&b| b == b'\n') {
        Some(pos) => &text[..=pos],
        None => text,
    }
}

fn write_first_line(out: &mut dyn Write, text: Option<&[u8]>) -> std::io::Result<()> {
    let line = text.map(first_line).unwrap_or_default();
    out.write_all(line)?;
    if !line.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Text the one-line forms are cut from: the whole help file, or the
/// first inline line (translated when `translate` is set).
fn lead_text(
    entry: &BuiltinEntry,
    translate: bool,
) -> Result<Option<Cow<'_, [u8]>>, HelpError> {
    let text: Option<Cow<'_, [u8]>> = match &entry.long_doc {
        LongDoc::FileBacked(path) => Some(Cow::Owned(read_helpfile(path)?)),
        LongDoc::Inline(lines) => lines.first().map(|line| {
            let line = if translate {
                gettext(line)
            } else {
                Cow::Borrowed(line.as_str())
            };
            match line {
                Cow::Borrowed(line) => Cow::Borrowed(line.as_bytes()),
                Cow::Owned(line) => Cow::Owned(line.into_bytes()),
            }
        }),
    };
    Ok(text)
}

fn write_indented(out: &mut dyn Write, line: &str) -> std::io::Result<()> {
    writeln!(out, "{:indent$}{}", "", line, indent = BASE_INDENT)
}

/// `name: synopsis`
pub fn show_synopsis(out: &mut dyn Write, entry: &BuiltinEntry) -> Result<(), HelpError> {
    writeln!(out, "{}: {}", entry.name, entry.short_doc)?;
    Ok(())
}

/// Full documentation: the help file verbatim, or every inline line indented.
pub fn show_longdoc(out: &mut dyn Write, entry: &BuiltinEntry) -> Result<(), HelpError> {
    match &entry.long_doc {
        LongDoc::FileBacked(path) => stream_helpfile(path, out),
        LongDoc::Inline(lines) => {
            for line in lines {
                write_indented(out, &gettext(line))?;
            }
            Ok(())
        }
    }
}

/// `name - first line of the documentation`
pub fn show_desc(out: &mut dyn Write, entry: &BuiltinEntry) -> Result<(), HelpError> {
    let text = lead_text(entry, false)?;

    write!(out, "{} - ", entry.name)?;
    write_first_line(out, text.as_deref())?;
    out.flush()?;
    Ok(())
}

/// Pseudo manual page.
pub fn show_manpage(out: &mut dyn Write, entry: &BuiltinEntry) -> Result<(), HelpError> {
    let text = lead_text(entry, true)?;

    writeln!(out, "NAME")?;
    write!(out, "{:indent$}{} - ", "", entry.name, indent = BASE_INDENT)?;
    write_first_line(out, text.as_deref())?;
    writeln!(out)?;

    writeln!(out, "SYNOPSIS")?;
    write_indented(out, &entry.short_doc)?;
    writeln!(out)?;

    writeln!(out, "DESCRIPTION")?;
    match (&entry.long_doc, text.as_deref()) {
        (LongDoc::Inline(lines), _) => {
            for line in lines {
                write_indented(out, &gettext(line))?;
            }
        }
        (LongDoc::FileBacked(_), Some(text)) => {
            // indent every line that follows a line break
            for (i, line) in text.split_inclusive(|&b| b == b'\n').enumerate() {
                if i > 0 {
                    write!(out, "{:indent$}", "", indent = BASE_INDENT)?;
                }
                out.write_all(line)?;
            }
            if text.ends_with(b"\n") {
                write!(out, "{:indent$}", "", indent = BASE_INDENT)?;
            }
        }
        (LongDoc::FileBacked(_), None) => {}
    }
    writeln!(out)?;

    writeln!(out, "SEE ALSO")?;
    write_indented(out, &format!("{SHELL_NAME}(1)"))?;
    writeln!(out)?;

    writeln!(out, "IMPLEMENTATION")?;
    write_indented(out, &shell_version())?;
    write_indented(out, &gettext(COPYRIGHT))?;
    write_indented(out, &gettext(LICENSE))?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    type Formatter = fn(&mut dyn Write, &BuiltinEntry) -> Result<(), HelpError>;

    fn inline_entry() -> BuiltinEntry {
        BuiltinEntry::new(
            "cd",
            "cd [dir]",
            LongDoc::Inline(vec![
                "Change the shell working directory.".to_string(),
                "".to_string(),
                "Change the current directory to DIR.".to_string(),
            ]),
        )
    }

    fn file_entry(file: &NamedTempFile) -> BuiltinEntry {
        BuiltinEntry::new(
            "kill",
            "kill pid ...",
            LongDoc::FileBacked(file.path().to_path_buf()),
        )
    }

    fn help_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn render_bytes(f: Formatter, entry: &BuiltinEntry) -> Vec<u8> {
        let mut out = Vec::new();
        f(&mut out, entry).unwrap();
        out
    }

    fn render(f: Formatter, entry: &BuiltinEntry) -> String {
        String::from_utf8(render_bytes(f, entry)).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line(b"one\ntwo\n"), b"one\n");
        assert_eq!(first_line(b"single"), b"single");
        assert_eq!(first_line(b""), b"");
    }

    #[test]
    fn test_synopsis() {
        assert_eq!(render(show_synopsis, &inline_entry()), "cd: cd [dir]\n");
    }

    #[test]
    fn test_longdoc_inline_is_indented() {
        assert_eq!(
            render(show_longdoc, &inline_entry()),
            "    Change the shell working directory.\n    \n    \
             Change the current directory to DIR.\n"
        );
    }

    #[test]
    fn test_longdoc_file_is_verbatim() {
        let content = b"Send a signal to a job.\n\n  -s sig\tsignal name\n";
        let file = help_file(content);
        assert_eq!(render_bytes(show_longdoc, &file_entry(&file)), content);
    }

    #[test]
    fn test_desc_inline() {
        assert_eq!(
            render(show_desc, &inline_entry()),
            "cd - Change the shell working directory.\n"
        );
    }

    #[test]
    fn test_desc_file_is_prefix_through_first_line_break() {
        let content = "Send a signal to a job.\nSecond line.\n";
        let file = help_file(content.as_bytes());
        let shown = render(show_desc, &file_entry(&file));
        assert_eq!(shown, "kill - Send a signal to a job.\n");
        assert!(content.starts_with(shown.trim_start_matches("kill - ")));
    }

    #[test]
    fn test_desc_file_keeps_non_utf8_bytes() {
        let content = b"Caf\xe9 au lait.\nsecond\n";
        let file = help_file(content);
        let shown = render_bytes(show_desc, &file_entry(&file));
        assert_eq!(shown, b"kill - Caf\xe9 au lait.\n");
        assert!(content.starts_with(&shown[b"kill - ".len()..]));
    }

    #[test]
    fn test_desc_empty_doc() {
        let entry = BuiltinEntry::new("true", "true", LongDoc::Inline(Vec::new()));
        assert_eq!(render(show_desc, &entry), "true - \n");
    }

    #[test]
    fn test_desc_missing_file_prints_nothing() {
        let entry = BuiltinEntry::new(
            "kill",
            "kill pid",
            LongDoc::FileBacked(PathBuf::from("/nonexistent/help/kill")),
        );
        let mut out = Vec::new();
        assert!(matches!(
            show_desc(&mut out, &entry),
            Err(HelpError::Open { .. })
        ));
        assert!(out.is_empty());
        assert!(matches!(
            show_manpage(&mut out, &entry),
            Err(HelpError::Open { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_manpage_inline() {
        let shown = render(show_manpage, &inline_entry());
        let expected = format!(
            "NAME\n    cd - Change the shell working directory.\n\n\
             SYNOPSIS\n    cd [dir]\n\n\
             DESCRIPTION\n    Change the shell working directory.\n    \n    \
             Change the current directory to DIR.\n\n\
             SEE ALSO\n    dsh(1)\n\n\
             IMPLEMENTATION\n    {}\n    {}\n    {}\n",
            shell_version(),
            COPYRIGHT,
            LICENSE
        );
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_manpage_file_reindents_after_line_breaks() {
        let file = help_file(b"Send a signal.\nOptions:\n-s sig\n");
        let shown = render(show_manpage, &file_entry(&file));
        assert!(shown.starts_with(
            "NAME\n    kill - Send a signal.\n\nSYNOPSIS\n    kill pid ...\n\n"
        ));
        assert!(shown.contains(
            "DESCRIPTION\nSend a signal.\n    Options:\n    -s sig\n    \nSEE ALSO\n"
        ));
    }

    #[test]
    fn test_manpage_file_keeps_non_utf8_bytes() {
        let file = help_file(b"Caf\xe9 au lait.\nsecond\n");
        let shown = render_bytes(show_manpage, &file_entry(&file));
        assert!(contains(&shown, b"NAME\n    kill - Caf\xe9 au lait.\n\n"));
        assert!(contains(
            &shown,
            b"DESCRIPTION\nCaf\xe9 au lait.\n    second\n    \nSEE ALSO\n"
        ));
    }

    #[test]
    fn test_manpage_section_order() {
        let shown = render(show_manpage, &inline_entry());
        let headers = [
            "NAME\n",
            "SYNOPSIS\n",
            "DESCRIPTION\n",
            "SEE ALSO\n",
            "IMPLEMENTATION\n",
        ];
        let positions: Vec<usize> = headers
            .iter()
            .map(|header| shown.find(header).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
