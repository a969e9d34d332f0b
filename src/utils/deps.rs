use crate::config::ToolsConfig;
use std::process::Command;

/// Availability of the external MKVToolNix programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyStatus {
    pub mkvmerge: bool,
    pub mkvextract: bool,
}

impl DependencyStatus {
    /// Check all dependencies
    pub fn check(tools: &ToolsConfig) -> Self {
        Self {
            mkvmerge: check_command(&tools.mkvmerge, &["--version"]),
            mkvextract: check_command(&tools.mkvextract, &["--version"]),
        }
    }

    pub fn all_available(&self) -> bool {
        self.mkvmerge && self.mkvextract
    }
}

/// Check if a command is available
fn check_command(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_are_reported() {
        let tools = ToolsConfig {
            mkvmerge: "mkvmerge-that-does-not-exist-12345".to_string(),
            mkvextract: "mkvextract-that-does-not-exist-12345".to_string(),
        };
        let status = DependencyStatus::check(&tools);
        assert!(!status.mkvmerge);
        assert!(!status.mkvextract);
        assert!(!status.all_available());
    }

    #[cfg(unix)]
    #[test]
    fn successful_command_counts_as_available() {
        assert!(check_command("true", &[]));
        assert!(!check_command("false", &[]));
    }
}
