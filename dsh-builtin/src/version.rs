/// Shell name used in banners and diagnostics
pub const SHELL_NAME: &str = "dsh";

pub const COPYRIGHT: &str = "Copyright (C) 2024 mopemope";

pub const LICENSE: &str = "License MIT/Apache-2.0: dual licensed, choose either license";

/// One line version banner, without trailing newline
pub fn shell_version() -> String {
    format!(
        "{SHELL_NAME}, version {} ({}-{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
