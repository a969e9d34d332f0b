use crate::extractor::plan::{ExtractionDirective, ExtractionPlan};
use std::path::Path;

/// One argument of an extraction command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A mode keyword such as `tracks`, written bare
    Keyword(&'static str),
    /// A path or `id:path` pair, written inside double quotes
    Opaque(String),
}

impl Arg {
    pub fn value(&self) -> &str {
        match self {
            Arg::Keyword(k) => k,
            Arg::Opaque(v) => v,
        }
    }
}

/// A single extraction tool invocation.
///
/// The text and argument-vector forms are both rendered from `args`, so they
/// always carry the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<Arg>,
}

impl Invocation {
    /// Arguments for `std::process::Command`, program excluded
    pub fn argv(&self) -> Vec<String> {
        self.args.iter().map(|a| a.value().to_string()).collect()
    }

    /// Shell text with every opaque argument in double quotes.
    ///
    /// Quotes, `$` and backticks inside names are not escaped.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            match arg {
                Arg::Keyword(k) => line.push_str(k),
                Arg::Opaque(v) => {
                    line.push('"');
                    line.push_str(v);
                    line.push('"');
                }
            }
        }
        line
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn pair_arg(id: u32, path: &Path) -> Arg {
    Arg::Opaque(format!("{}:{}", id, path_arg(path)))
}

fn invocation(program: &str, source: &Path, mode: &'static str, targets: Vec<Arg>) -> Invocation {
    let mut args = vec![Arg::Opaque(path_arg(source)), Arg::Keyword(mode)];
    args.extend(targets);
    Invocation {
        program: program.to_string(),
        args,
    }
}

/// Build the invocations of one plan: one `tracks` call covering every track
/// directive, then `chapters`, then `attachments`. A no-op plan yields none.
pub fn build_invocations(plan: &ExtractionPlan, program: &str) -> Vec<Invocation> {
    let mut tracks = Vec::new();
    let mut chapters = Vec::new();
    let mut attachments = Vec::new();

    for directive in &plan.directives {
        match directive {
            ExtractionDirective::Tracks { outputs, .. } => {
                tracks.extend(outputs.iter().map(|(id, path)| pair_arg(*id, path)));
            }
            ExtractionDirective::Chapters { output } => {
                chapters.push(Arg::Opaque(path_arg(output)));
            }
            ExtractionDirective::Attachments { outputs } => {
                attachments.extend(outputs.iter().map(|(id, path)| pair_arg(*id, path)));
            }
        }
    }

    [("tracks", tracks), ("chapters", chapters), ("attachments", attachments)]
        .into_iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(mode, targets)| invocation(program, &plan.source, mode, targets))
        .collect()
}

/// Render plans as a commented shell script, one block per file
pub fn render_script(plans: &[ExtractionPlan], program: &str) -> String {
    let mut script = String::new();
    for plan in plans {
        script.push_str(&format!("# {}\n", plan.file_name));
        if plan.is_noop() {
            script.push_str("# Nothing to do...\n");
            continue;
        }
        for invocation in build_invocations(plan, program) {
            script.push_str(&invocation.command_line());
            script.push('\n');
        }
    }
    script
}
