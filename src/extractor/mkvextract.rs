use crate::error::AppError;
use crate::extractor::command_builder::{Invocation, build_invocations};
use crate::extractor::plan::ExtractionPlan;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Result of running the extraction for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractResult {
    /// Every invocation succeeded
    Success { invocations: usize },
    /// The plan had nothing to do
    Skipped,
    /// At least one invocation failed; later invocations still ran
    Error(Vec<AppError>),
}

/// Outcome for one file of the folder
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub file_name: String,
    pub result: ExtractResult,
}

/// Run a single invocation without a shell
pub fn run_invocation(invocation: &Invocation) -> Result<(), AppError> {
    info!("Extracting: {}", invocation.command_line());

    let output = Command::new(&invocation.program)
        .args(invocation.argv())
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            AppError::Extraction(format!("Failed to execute {}: {}", invocation.program, e))
        })?;

    // mkvextract exits with 1 when it only emitted warnings
    match output.status.code() {
        Some(0) | Some(1) => Ok(()),
        _ => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            let last_lines: Vec<&str> = detail.lines().rev().take(5).collect();
            Err(AppError::Extraction(format!(
                "{} failed with status {}: {}",
                invocation.program,
                output.status,
                last_lines.into_iter().rev().collect::<Vec<_>>().join("\n")
            )))
        }
    }
}

/// Execute one plan. No-op plans never spawn a process.
pub fn execute_plan(plan: &ExtractionPlan, program: &str) -> ExtractResult {
    if plan.is_noop() {
        info!("{}: nothing to do", plan.file_name);
        return ExtractResult::Skipped;
    }

    let invocations = build_invocations(plan, program);
    let errors: Vec<AppError> = invocations
        .iter()
        .filter_map(|invocation| run_invocation(invocation).err())
        .inspect(|e| warn!("{}: {}", plan.file_name, e))
        .collect();

    if errors.is_empty() {
        ExtractResult::Success {
            invocations: invocations.len(),
        }
    } else {
        ExtractResult::Error(errors)
    }
}

/// Execute every plan in order; a failing file does not stop the others
pub fn execute_plans(plans: &[ExtractionPlan], program: &str) -> Vec<ExtractOutcome> {
    plans
        .iter()
        .map(|plan| ExtractOutcome {
            file_name: plan.file_name.clone(),
            result: execute_plan(plan, program),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::plan::ExtractionDirective;
    use std::path::PathBuf;

    fn chapters_plan(name: &str) -> ExtractionPlan {
        ExtractionPlan {
            file_name: name.to_string(),
            source: PathBuf::from(format!("/nowhere/{}", name)),
            directives: vec![ExtractionDirective::Chapters {
                output: PathBuf::from("/nowhere/out.chapters.xml"),
            }],
        }
    }

    #[test]
    fn noop_plan_is_skipped() {
        let plan = ExtractionPlan {
            file_name: "a.mkv".to_string(),
            source: PathBuf::from("/nowhere/a.mkv"),
            directives: Vec::new(),
        };
        // The program does not exist; a spawn attempt would turn into an error
        assert_eq!(
            execute_plan(&plan, "mkvextract-that-does-not-exist-12345"),
            ExtractResult::Skipped
        );
    }

    #[test]
    fn missing_program_is_an_extraction_error() {
        let result = execute_plan(&chapters_plan("a.mkv"), "mkvextract-that-does-not-exist-12345");
        match result {
            ExtractResult::Error(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], AppError::Extraction(_)));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// A plan whose source is a shell script, so that running it with `sh`
    /// exits with a chosen status
    #[cfg(unix)]
    fn script_plan(dir: &std::path::Path, body: &str) -> ExtractionPlan {
        let script = dir.join("tool.sh");
        std::fs::write(&script, body).unwrap();
        ExtractionPlan {
            file_name: "a.mkv".to_string(),
            source: script,
            directives: vec![ExtractionDirective::Chapters {
                output: dir.join("a.chapters.xml"),
            }],
        }
    }

    #[cfg(unix)]
    #[test]
    fn successful_program() {
        let outcomes = execute_plans(&[chapters_plan("a.mkv"), chapters_plan("b.mkv")], "true");
        assert_eq!(outcomes.len(), 2);
        assert!(
            outcomes
                .iter()
                .all(|o| o.result == ExtractResult::Success { invocations: 1 })
        );
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_one_counts_as_success() {
        let dir = tempfile::tempdir().unwrap();
        let plan = script_plan(dir.path(), "echo 'Warning: odd chapter' >&2\nexit 1\n");
        assert_eq!(
            execute_plan(&plan, "sh"),
            ExtractResult::Success { invocations: 1 }
        );
        assert_eq!(
            execute_plan(&chapters_plan("b.mkv"), "false"),
            ExtractResult::Success { invocations: 1 }
        );
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_two_is_an_error_with_stderr_tail() {
        let dir = tempfile::tempdir().unwrap();
        let plan = script_plan(dir.path(), "echo 'Error: no chapters found' >&2\nexit 2\n");
        match execute_plan(&plan, "sh") {
            ExtractResult::Error(errors) => {
                assert_eq!(errors.len(), 1);
                match &errors[0] {
                    AppError::Extraction(message) => {
                        assert!(message.contains("Error: no chapters found"), "{}", message);
                    }
                    other => panic!("unexpected error: {:?}", other),
                }
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
