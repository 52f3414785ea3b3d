//! External section-header dumper.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Dumper used when none is configured.
pub const DEFAULT_OBJDUMP: &str = "riscv64-unknown-elf-objdump";

/// Runs `<tool> -M numeric -D <binfile> -h` and returns its standard output.
///
/// Anything on standard error, or a failing exit status, is reported as an error.
pub fn dump_section_headers(tool: &str, binfile: &Path) -> Result<String> {
    tracing::debug!("Running {} on {}", tool, binfile.display());
    let output = Command::new(tool)
        .args(["-M", "numeric", "-D"])
        .arg(binfile)
        .arg("-h")
        .output()
        .map_err(|source| Error::ToolInvocationFailed {
            tool: tool.to_string(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(Error::ToolReportedError {
            tool: tool.to_string(),
            message: stderr.trim().to_string(),
        });
    }
    if !output.status.success() {
        return Err(Error::ToolReportedError {
            tool: tool.to_string(),
            message: format!("exited with {}", output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_an_invocation_failure() {
        let err = dump_section_headers("elf2mem-no-such-objdump", Path::new("a.out")).unwrap_err();
        assert!(matches!(err, Error::ToolInvocationFailed { .. }));
        assert!(err.to_string().contains("elf2mem-no-such-objdump"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_is_a_reported_error() {
        let err = dump_section_headers("false", Path::new("a.out")).unwrap_err();
        assert!(matches!(err, Error::ToolReportedError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn captures_standard_output() {
        // echo prints its arguments, which stands in for the dumper's listing.
        let out = dump_section_headers("echo", Path::new("prog.elf")).unwrap();
        assert_eq!(out.trim(), "-M numeric -D prog.elf -h");
    }
}
