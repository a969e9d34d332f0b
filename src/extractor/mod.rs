pub mod command_builder;
pub mod mkvextract;
pub mod plan;

pub use command_builder::{Arg, Invocation, build_invocations, render_script};
pub use mkvextract::{ExtractOutcome, ExtractResult, execute_plan, execute_plans};
pub use plan::{ExtractionDirective, ExtractionPlan, Scope, build_plan};
