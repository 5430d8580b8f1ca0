use super::error::HelpError;
use crate::ShellProxy;
use crate::i18n::gettext;
use crate::registry::BuiltinEntry;
use std::io::Write;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const INTRODUCTION: &str = "\
These shell commands are defined internally.  Type `help' to see this list.
Type `help name' to find out more about the function `name'.
Use `man dsh' to find out more about the shell in general.
Use `man -k' or `info' to find out more about commands not in this list.

A star (*) next to a name means that the command is disabled.

";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Complete,
    Canceled,
}

/// One listing cell: the disabled marker followed by the synopsis, cut to
/// `budget` display columns and ended with `>` when it does not fit.
fn cell(entry: &BuiltinEntry, budget: usize) -> String {
    let mut cell = String::with_capacity(budget + 2);
    cell.push(if entry.enabled { ' ' } else { '*' });

    if entry.short_doc.width() <= budget {
        cell.push_str(&entry.short_doc);
        return cell;
    }

    let mut used = 0;
    for ch in entry.short_doc.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cell.push(ch);
    }
    cell.push('>');
    cell
}

/// Print the introduction and every registry entry in two columns of
/// `width` display columns each. The proxy is polled for cancellation once
/// per row.
pub fn show_builtin_command_help(
    out: &mut dyn Write,
    proxy: &dyn ShellProxy,
    width: usize,
) -> Result<Listing, HelpError> {
    out.write_all(gettext(INTRODUCTION).as_bytes())?;

    let entries = proxy.builtin_registry().entries();
    let total = entries.len();
    let height = total.div_ceil(2);
    debug!("listing {} builtins in {} rows of width {}", total, height, width);

    for i in 0..height {
        if proxy.is_canceled() {
            debug!("listing canceled at row {}", i);
            return Ok(Listing::Canceled);
        }

        let left = cell(&entries[i], width.saturating_sub(3));
        out.write_all(left.as_bytes())?;
        if i * 2 >= total || i + height >= total {
            writeln!(out)?;
            break;
        }

        let pad = width.saturating_sub(left.width());
        write!(out, "{:pad$}", "")?;

        let right = cell(&entries[i + height], width.saturating_sub(4));
        writeln!(out, "{right}")?;
    }

    Ok(Listing::Complete)
}
