//! Host architecture precondition for the regex matcher.

use crate::error::{Error, Result};

/// Architectures the multi-pattern matcher is built and validated against.
const SUPPORTED_ARCHES: &[&str] = &["x86_64", "amd64"];

/// Verify the process is running on a supported architecture.
///
/// Checked once, before any pattern set is compiled.
pub fn check() -> Result<()> {
    let arch = std::env::consts::ARCH;
    if SUPPORTED_ARCHES.contains(&arch) {
        Ok(())
    } else {
        Err(Error::Platform(format!(
            "cannot run the pattern matcher on non-Intel-compatible platform: {arch}"
        )))
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
