use anyhow::Result;
use nix::sys::signal::{
    SaFlags, SigAction, SigHandler, SigSet, SigmaskHow, Signal, sigaction, sigprocmask,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

static RECEIVED_SIGINT: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_: i32) {
    RECEIVED_SIGINT.store(true, Ordering::SeqCst);
}

pub(crate) fn install_sigint_handler() -> Result<()> {
    let handler = SigHandler::Handler(handle_sigint);
    let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());
    unsafe {
        sigaction(Signal::SIGINT, &action)?;
    }
    unblock_sigint()?;
    debug!("SIGINT handler installed");
    Ok(())
}

fn unblock_sigint() -> Result<()> {
    let mut set = SigSet::empty();
    set.add(Signal::SIGINT);
    sigprocmask(SigmaskHow::SIG_UNBLOCK, Some(&set), None)?;
    Ok(())
}

/// True once per received SIGINT.
pub(crate) fn check_and_clear_sigint() -> bool {
    let received = RECEIVED_SIGINT.swap(false, Ordering::SeqCst);
    if received {
        debug!("SIGINT observed");
    }
    received
}
