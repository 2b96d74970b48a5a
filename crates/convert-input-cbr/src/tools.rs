//! External-tool availability, probed once per tool name per process.

use std::collections::HashMap;
use std::process::Command;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use convert_core::ports::ToolAvailability;

static TOOL_CACHE: Lazy<Mutex<HashMap<String, bool>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Probes `$PATH` for executables via `which`, caching each answer for the
/// process lifetime. Recomputing would be idempotent, so a lost race between
/// two first-time probes of the same tool is harmless.
pub struct SystemTools;

impl ToolAvailability for SystemTools {
    fn exists(&self, tool: &str) -> bool {
        if let Some(&known) = cache().get(tool) {
            return known;
        }
        let found = probe(tool);
        log::info!("Tool \"{}\" {}", tool, if found { "found" } else { "not found" });
        cache().insert(tool.to_string(), found);
        found
    }
}

fn cache() -> std::sync::MutexGuard<'static, HashMap<String, bool>> {
    TOOL_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn probe(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reports_false_and_is_cached() {
        let tools = SystemTools;
        assert!(!tools.exists("definitely-not-a-real-tool-name"));
        assert_eq!(
            cache().get("definitely-not-a-real-tool-name"),
            Some(&false)
        );
        // Second lookup hits the cache.
        assert!(!tools.exists("definitely-not-a-real-tool-name"));
    }

    #[test]
    fn test_common_shell_exists() {
        // `sh` is present on any platform these extractors run on.
        assert!(SystemTools.exists("sh"));
    }
}
