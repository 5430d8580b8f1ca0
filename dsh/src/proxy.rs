use crate::signal;
use dsh_builtin::ShellProxy;
use dsh_builtin::registry::BuiltinRegistry;

/// Minimal shell state needed to run `help` outside the interactive shell.
pub struct HelpShell {
    registry: BuiltinRegistry,
}

impl HelpShell {
    pub fn new(registry: BuiltinRegistry) -> Self {
        Self { registry }
    }
}

impl ShellProxy for HelpShell {
    fn get_var(&mut self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn builtin_registry(&self) -> &BuiltinRegistry {
        &self.registry
    }

    fn is_canceled(&self) -> bool {
        signal::check_and_clear_sigint()
    }
}
