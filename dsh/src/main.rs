use crate::proxy::HelpShell;
use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use dsh_builtin::help::COMMAND_NAME;
use dsh_builtin::registry::{BuiltinRegistry, default_registry};
use dsh_types::Context;
use nix::unistd::getpid;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod proxy;
mod signal;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Display information about dsh builtin commands",
    long_about = None
)]
struct Cli {
    /// JSON registry to read instead of the built-in table
    #[arg(short, long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Arguments passed to `help`, e.g. `-- -d cd`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dsh-help: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_env("DSH_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("{err}"))
}

fn load_registry(path: Option<&PathBuf>) -> Result<BuiltinRegistry> {
    match path {
        Some(path) => BuiltinRegistry::load(path)
            .with_context(|| format!("failed to load registry {}", path.display())),
        None => Ok(default_registry().clone()),
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    signal::install_sigint_handler()?;

    let registry = load_registry(cli.registry.as_ref())?;
    debug!("registry with {} builtins", registry.len());
    let mut shell = HelpShell::new(registry);
    let ctx = Context::new(getpid(), true);

    let command = dsh_builtin::get_command(COMMAND_NAME)
        .ok_or_else(|| anyhow!("{COMMAND_NAME} builtin is not registered"))?;

    let mut argv = vec![COMMAND_NAME.to_string()];
    argv.extend(cli.args);
    let status = command(&ctx, argv, &mut shell);
    debug!("{} exited with {:?}", COMMAND_NAME, status);

    Ok(ExitCode::from((status.code() & 0xff) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_passes_hyphen_arguments_after_double_dash() {
        let cli = Cli::parse_from(["dsh-help", "--", "-d", "cd"]);
        assert!(cli.registry.is_none());
        assert_eq!(cli.args, vec!["-d", "cd"]);
    }

    #[test]
    fn test_cli_registry_option() {
        let cli = Cli::parse_from(["dsh-help", "--registry", "/tmp/builtins.json", "cd"]);
        assert_eq!(cli.registry, Some(PathBuf::from("/tmp/builtins.json")));
        assert_eq!(cli.args, vec!["cd"]);
    }

    #[test]
    fn test_load_default_registry() {
        let registry = load_registry(None).unwrap();
        assert_eq!(registry.len(), default_registry().len());
    }

    #[test]
    fn test_load_missing_registry() {
        let path = PathBuf::from("/nonexistent/builtins.json");
        let err = load_registry(Some(&path)).unwrap_err();
        let expected = "failed to load registry /nonexistent/builtins.json";
        assert!(format!("{err:#}").starts_with(expected));
    }
}
