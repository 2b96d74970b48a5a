//! Two-tier archive extraction: `7z` first, `unrar` as fallback.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

use convert_core::error::{ConvertError, ExtractionHint, Result};
use convert_core::ports::{Extractor, ExtractionReport, ToolAvailability};

use crate::classify::needs_unrar_fallback;

/// Outcome of one external-tool invocation.
struct ToolRun {
    success: bool,
    code: i32,
    output: String,
}

/// Extracts CBR/CBZ archives by shelling out to `7z`, falling back to
/// `unrar` when the diagnostics flag a format `7z` cannot handle and the
/// tool is installed. Never cleans up the destination directory; that
/// belongs to the orchestrator.
pub struct CbrExtractor {
    tools: Box<dyn ToolAvailability>,
}

impl CbrExtractor {
    pub fn new(tools: Box<dyn ToolAvailability>) -> Self {
        Self { tools }
    }
}

impl Extractor for CbrExtractor {
    fn name(&self) -> &str {
        "CBR/CBZ"
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionReport> {
        fs::create_dir_all(dest)?;

        let primary = run_7z(archive, dest);
        if primary.success {
            return Ok(ExtractionReport {
                code: primary.code,
                output: primary.output,
            });
        }
        log::warn!(
            "7z failed on {} (exit code {})\n{}",
            archive.display(),
            primary.code,
            primary.output
        );

        let needs_unrar = needs_unrar_fallback(&primary.output);
        let has_unrar = self.tools.exists("unrar");

        let mut code = primary.code;
        let mut output = primary.output;

        if has_unrar {
            let fallback = run_unrar(archive, dest);
            output = concat_output(&output, &fallback.output);
            if fallback.success {
                return Ok(ExtractionReport {
                    code: fallback.code,
                    output,
                });
            }
            log::warn!(
                "unrar failed on {} (exit code {})",
                archive.display(),
                fallback.code
            );
            code = fallback.code;
        }

        Err(failure_error(needs_unrar, has_unrar, code, output))
    }
}

/// Pick the hint for a failed extraction: the install hint only applies when
/// the diagnostics called for the fallback tool and it was not available.
fn failure_error(needs_unrar: bool, has_unrar: bool, code: i32, details: String) -> ConvertError {
    let hint = if needs_unrar && !has_unrar {
        ExtractionHint::InstallUnrar
    } else {
        ExtractionHint::PossiblyCorrupt
    };
    ConvertError::Extraction {
        code,
        hint,
        details,
    }
}

/// `7z x <archive> -o<dest> -aoa` — extract with paths, overwrite all.
fn run_7z(archive: &Path, dest: &Path) -> ToolRun {
    let mut out_flag = OsString::from("-o");
    out_flag.push(dest.as_os_str());

    let mut cmd = Command::new("7z");
    cmd.arg("x").arg(archive).arg(out_flag).arg("-aoa");
    run_tool(cmd)
}

/// `unrar x -o+ -y <archive> <dest>/` — extract with paths, overwrite, no
/// prompts. unrar requires the trailing separator on the destination.
fn run_unrar(archive: &Path, dest: &Path) -> ToolRun {
    let mut target = OsString::from(dest.as_os_str());
    target.push(std::path::MAIN_SEPARATOR_STR);

    let mut cmd = Command::new("unrar");
    cmd.arg("x").arg("-o+").arg("-y").arg(archive).arg(target);
    run_tool(cmd)
}

/// Run a tool to completion, capturing combined stdout/stderr and exit code.
/// A spawn failure (tool not installed at all) reports as a failed run with
/// the launch error as its diagnostic text.
fn run_tool(mut cmd: Command) -> ToolRun {
    match cmd.output() {
        Ok(out) => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let output = concat_output(stdout.trim(), String::from_utf8_lossy(&out.stderr).trim());
            ToolRun {
                success: out.status.success(),
                code: out.status.code().unwrap_or(-1),
                output,
            }
        }
        Err(e) => ToolRun {
            success: false,
            code: -1,
            output: format!("failed to run {:?}: {}", cmd.get_program(), e),
        },
    }
}

fn concat_output(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{}\n{}", first, second),
    }
}
