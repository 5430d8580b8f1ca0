use dsh_types::{Context, ExitStatus};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

// Builtin command modules
pub mod help;
pub mod i18n;
pub mod registry;
pub mod version;

pub use registry::{BuiltinEntry, BuiltinRegistry, LongDoc};

/// Trait that provides an interface for builtin commands to interact with the shell
/// This allows builtin commands to perform shell operations without direct coupling
pub trait ShellProxy {
    /// Retrieves a shell variable value by key
    fn get_var(&mut self, key: &str) -> Option<String>;

    /// Table describing every builtin the shell knows about
    fn builtin_registry(&self) -> &BuiltinRegistry;

    /// Returns true once after an interrupt was received
    fn is_canceled(&self) -> bool;
}

/// Type alias for builtin command function signature
/// All builtin commands must conform to this signature
pub type BuiltinCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus;

/// Global registry of all builtin commands
/// Uses lazy initialization and mutex for thread-safe access
pub static BUILTIN_COMMAND: Lazy<Mutex<HashMap<&str, BuiltinCommand>>> = Lazy::new(|| {
    let mut builtin = HashMap::new();

    builtin.insert(help::COMMAND_NAME, help::command as BuiltinCommand);

    Mutex::new(builtin)
});

/// Retrieves a builtin command function by name
/// Returns None if the command is not found
pub fn get_command(name: &str) -> Option<BuiltinCommand> {
    if let Ok(builtin) = BUILTIN_COMMAND.lock() {
        builtin.get(name).copied()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_command_help() {
        assert!(get_command("help").is_some());
    }

    #[test]
    fn test_get_command_unknown() {
        assert!(get_command("no-such-builtin").is_none());
    }
}
