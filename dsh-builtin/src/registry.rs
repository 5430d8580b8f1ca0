//! Builtin documentation registry.
//!
//! An ordered, read-only table of every builtin with its synopsis and its
//! long documentation. The table is built once and handed to builtins
//! through [`crate::ShellProxy::builtin_registry`].

use dsh_types::{DshError, DshResult};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Long documentation of a builtin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LongDoc {
    /// Description lines, without line terminators
    Inline(Vec<String>),
    /// Absolute path of a help file holding the full text
    FileBacked(PathBuf),
}

impl LongDoc {
    /// Classify raw documentation lines.
    ///
    /// Exactly one line starting with `/` names a help file; anything else is
    /// inline text. Generated registry data relies on this convention.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.len() == 1 && lines[0].starts_with('/') {
            let mut lines = lines;
            LongDoc::FileBacked(PathBuf::from(lines.remove(0)))
        } else {
            LongDoc::Inline(lines)
        }
    }

    pub fn is_file_backed(&self) -> bool {
        matches!(self, LongDoc::FileBacked(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinEntry {
    pub name: String,
    /// One line usage synopsis
    pub short_doc: String,
    pub long_doc: LongDoc,
    pub enabled: bool,
}

impl BuiltinEntry {
    pub fn new(name: &str, short_doc: &str, long_doc: LongDoc) -> Self {
        Self {
            name: name.to_string(),
            short_doc: short_doc.to_string(),
            long_doc,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Fixed, ordered table of builtin entries.
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    entries: Vec<BuiltinEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    name: String,
    short_doc: String,
    #[serde(default)]
    long_doc: Vec<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl BuiltinRegistry {
    pub fn new(entries: Vec<BuiltinEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{name, short_doc, long_doc, enabled}` objects.
    pub fn from_json(json: &str) -> DshResult<Self> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|err| DshError::Parse(err.to_string()))?;
        let entries = raw
            .into_iter()
            .map(|raw| BuiltinEntry {
                name: raw.name,
                short_doc: raw.short_doc,
                long_doc: LongDoc::from_lines(raw.long_doc),
                enabled: raw.enabled,
            })
            .collect::<Vec<_>>();
        debug!("loaded {} registry entries", entries.len());
        Ok(Self::new(entries))
    }

    /// Load a JSON registry file.
    pub fn load(path: &Path) -> DshResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DshError::File {
            operation: "read".to_string(),
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[BuiltinEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BuiltinEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&BuiltinEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

type DocTable = [(&'static str, &'static str, &'static [&'static str])];

// (name, synopsis, description lines)
const DSH_BUILTINS: &DocTable = &[
    (
        "abbr",
        "abbr [-e] [name [expansion]]",
        &[
            "Manage abbreviations that expand when typed.",
            "",
            "With no arguments, list all abbreviations. With NAME and EXPANSION,",
            "define NAME to expand to EXPANSION when followed by a space.",
            "",
            "Options:",
            "  -e\terase the abbreviation NAME",
        ],
    ),
    (
        "add_path",
        "add_path dir",
        &[
            "Add a directory to the PATH environment variable.",
            "",
            "DIR is inserted at the front of PATH so it takes precedence over",
            "the directories already present.",
        ],
    ),
    (
        "alias",
        "alias [name[=command]]",
        &[
            "Define or display aliases.",
            "",
            "Without arguments, print the list of aliases in a table.",
            "NAME prints one alias; NAME=COMMAND defines it.",
            "",
            "Exit Status:",
            "Returns success unless NAME is not an alias or is invalid.",
        ],
    ),
    (
        "bg",
        "bg [job_spec]",
        &[
            "Move a job to the background.",
            "",
            "Resume the suspended job JOB_SPEC in the background. If JOB_SPEC",
            "is not present, the most recent job is used.",
        ],
    ),
    (
        "cd",
        "cd [dir]",
        &[
            "Change the shell working directory.",
            "",
            "Change the current directory to DIR. The default DIR is the value",
            "of the HOME shell variable. Visited directories are recorded for `z'.",
            "",
            "Exit Status:",
            "Returns success if the directory is changed; failure otherwise.",
        ],
    ),
    (
        "chat",
        "chat [-m model] [message ...]",
        &[
            "Chat with the AI assistant.",
            "",
            "Send MESSAGE to the configured model and print the reply.",
        ],
    ),
    (
        "chat_model",
        "chat_model [model]",
        &[
            "Set or show the AI model used for chat.",
        ],
    ),
    (
        "chat_prompt",
        "chat_prompt [prompt]",
        &[
            "Set or show the system prompt for chat.",
        ],
    ),
    (
        "dmv",
        "dmv [-vf] [dir]",
        &[
            "Rename files with your editor.",
            "",
            "Open the file names of DIR in $EDITOR and rename every file whose",
            "line was changed.",
            "",
            "Options:",
            "  -v\tshow detailed output",
            "  -f\toverwrite existing files",
        ],
    ),
    (
        "exit",
        "exit [n]",
        &[
            "Exit the shell.",
            "",
            "Exits the shell with a status of N. If N is omitted, the exit status",
            "is that of the last command executed.",
        ],
    ),
    (
        "fg",
        "fg [job_spec]",
        &[
            "Move job to the foreground.",
            "",
            "Place the job identified by JOB_SPEC in the foreground, making it the",
            "current job. If JOB_SPEC is not present, the most recent job is used.",
        ],
    ),
    (
        "gco",
        "gco [branch]",
        &[
            "Check out git branches with fuzzy selection.",
        ],
    ),
    (
        "glog",
        "glog [revision-range]",
        &[
            "View the git log with fuzzy selection.",
        ],
    ),
    (
        "help",
        "help [-dms] [pattern ...]",
        &[
            "Display information about builtin commands.",
            "",
            "Displays brief summaries of builtin commands. If PATTERN is",
            "specified, gives detailed help on all commands matching PATTERN,",
            "otherwise the list of help topics is printed.",
            "",
            "Options:",
            "  -d\toutput short description for each topic",
            "  -m\tdisplay usage in pseudo-manpage format",
            "  -s\toutput only a short usage synopsis for each topic matching",
            "    \tPATTERN",
            "",
            "Arguments:",
            "  PATTERN\tPattern specifying a help topic",
            "",
            "Exit Status:",
            "Returns success unless PATTERN is not found or an invalid option is given.",
        ],
    ),
    (
        "history",
        "history [-c] [n]",
        &[
            "Display the command history list.",
            "",
            "With N, list only the last N entries.",
            "",
            "Options:",
            "  -c\tclear the history list",
        ],
    ),
    (
        "jobs",
        "jobs",
        &[
            "Display status of jobs.",
            "",
            "Lists the active jobs with their job number, process id and state.",
        ],
    ),
    (
        "lisp",
        "lisp expression",
        &[
            "Evaluate a Lisp expression.",
            "",
            "EXPRESSION is evaluated by the embedded interpreter that also reads",
            "the shell configuration.",
        ],
    ),
    (
        "read",
        "read name ...",
        &[
            "Read a line from the standard input.",
            "",
            "The line is split into fields and the first field is assigned to the",
            "first NAME, the second to the second NAME, and so on.",
        ],
    ),
    (
        "reload",
        "reload",
        &[
            "Reload the shell configuration.",
        ],
    ),
    (
        "serve",
        "serve [-p port] [-v] [-o] [--cors] [--no-index] [dir]",
        &[
            "Start a simple HTTP file server.",
            "",
            "Serve the files below DIR, the current directory by default.",
        ],
    ),
    (
        "set",
        "set [name [value]]",
        &[
            "Set shell options.",
        ],
    ),
    (
        "uuid",
        "uuid",
        &[
            "Generate a random UUID.",
            "",
            "Prints a version 4 UUID on the standard output.",
        ],
    ),
    (
        "var",
        "var [name [value]]",
        &[
            "Manage shell variables.",
            "",
            "Without arguments, print all shell variables in a table.",
        ],
    ),
    (
        "z",
        "z [dir ...]",
        &[
            "Jump to frequently used directories.",
            "",
            "Ranks visited directories by frecency and changes to the best match",
            "for the given words.",
        ],
    ),
];

static DEFAULT_REGISTRY: Lazy<BuiltinRegistry> = Lazy::new(|| {
    let entries = DSH_BUILTINS
        .iter()
        .map(|(name, short_doc, lines)| {
            let lines = lines.iter().map(|line| line.to_string()).collect();
            BuiltinEntry::new(name, short_doc, LongDoc::from_lines(lines))
        })
        .collect();
    BuiltinRegistry::new(entries)
});

/// Registry describing the dsh builtins.
pub fn default_registry() -> &'static BuiltinRegistry {
    &DEFAULT_REGISTRY
}
