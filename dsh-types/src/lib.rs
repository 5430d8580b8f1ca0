use anyhow::Result;
use libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{Pid, isatty};
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::mem::ManuallyDrop;
use std::os::unix::io::FromRawFd;
use std::os::unix::io::RawFd;
use thiserror::Error;
use tracing::debug;

/// Doge Shell specific error types
#[derive(Error, Debug)]
pub enum DshError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("File operation failed: {operation} on {path}: {source}")]
    File {
        operation: String,
        path: String,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type DshResult<T> = std::result::Result<T, DshError>;

/// Execution context of a builtin: the descriptors it reads from and writes to.
#[derive(Clone)]
pub struct Context {
    pub shell_pid: Pid,
    pub foreground: bool,
    pub interactive: bool,
    pub infile: RawFd,
    pub outfile: RawFd,
    pub errfile: RawFd,
}

impl Context {
    pub fn new(shell_pid: Pid, foreground: bool) -> Self {
        let interactive = isatty(STDIN_FILENO).unwrap_or(false);
        debug!("Context created: pid={} interactive={}", shell_pid, interactive);

        Context {
            shell_pid,
            foreground,
            interactive,
            infile: STDIN_FILENO,
            outfile: STDOUT_FILENO,
            errfile: STDERR_FILENO,
        }
    }

    /// Writer over the output descriptor. The descriptor stays open when the writer is dropped.
    pub fn stdout(&self) -> FdWriter {
        FdWriter::new(self.outfile)
    }

    /// Writer over the error descriptor. The descriptor stays open when the writer is dropped.
    pub fn stderr(&self) -> FdWriter {
        FdWriter::new(self.errfile)
    }

    pub fn write_stdout(&self, msg: &str) -> Result<()> {
        let mut out = self.stdout();
        writeln!(&mut out, "{msg}")?;
        Ok(())
    }

    pub fn write_stderr(&self, msg: &str) -> Result<()> {
        let mut err = self.stderr();
        writeln!(&mut err, "{msg}")?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.infile = STDIN_FILENO;
        self.outfile = STDOUT_FILENO;
        self.errfile = STDERR_FILENO;
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Context")
            .field("shell_pid", &self.shell_pid)
            .field("foreground", &self.foreground)
            .field("interactive", &self.interactive)
            .field("infile", &self.infile)
            .field("outfile", &self.outfile)
            .field("errfile", &self.errfile)
            .finish()
    }
}

/// `Write` over a descriptor owned by someone else.
pub struct FdWriter {
    file: ManuallyDrop<File>,
}

impl FdWriter {
    fn new(fd: RawFd) -> Self {
        // The File is never dropped, so the descriptor is never closed here.
        let file = unsafe { File::from_raw_fd(fd) };
        FdWriter {
            file: ManuallyDrop::new(file),
        }
    }
}

impl Write for FdWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    ExitedWith(i32),
}

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus::ExitedWith(0);
    pub const FAILURE: ExitStatus = ExitStatus::ExitedWith(1);
    pub const USAGE: ExitStatus = ExitStatus::ExitedWith(2);

    /// Process exit code for a finished builtin.
    pub fn code(&self) -> i32 {
        let ExitStatus::ExitedWith(code) = self;
        *code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};
    use std::os::unix::io::AsRawFd;

    fn read_back(file: &mut File) -> String {
        let mut buf = String::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_string(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_write_stdout_appends_newline() {
        let mut out = tempfile::tempfile().unwrap();
        let mut ctx = Context::new(Pid::from_raw(0), false);
        ctx.outfile = out.as_raw_fd();

        ctx.write_stdout("hello").unwrap();
        ctx.write_stdout("world").unwrap();

        assert_eq!(read_back(&mut out), "hello\nworld\n");
    }

    #[test]
    fn test_writer_does_not_close_descriptor() {
        let mut err = tempfile::tempfile().unwrap();
        let mut ctx = Context::new(Pid::from_raw(0), false);
        ctx.errfile = err.as_raw_fd();

        {
            let mut w = ctx.stderr();
            w.write_all(b"first ").unwrap();
        }
        // still usable after the writer went away
        let mut w = ctx.stderr();
        w.write_all(b"second").unwrap();
        w.flush().unwrap();

        assert_eq!(read_back(&mut err), "first second");
    }

    #[test]
    fn test_reset_restores_standard_descriptors() {
        let mut ctx = Context::new(Pid::from_raw(0), true);
        ctx.outfile = 42;
        ctx.errfile = 43;
        ctx.reset();
        assert_eq!(ctx.outfile, STDOUT_FILENO);
        assert_eq!(ctx.errfile, STDERR_FILENO);
        assert!(ctx.foreground);
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::SUCCESS.code(), 0);
        assert_eq!(ExitStatus::FAILURE.code(), 1);
        assert_eq!(ExitStatus::USAGE.code(), 2);
        assert_eq!(ExitStatus::ExitedWith(130).code(), 130);
    }
}
