mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use mkvbulk::analyzer::{FileRecord, MkvmergeProbe};
use mkvbulk::config::AppConfig;
use mkvbulk::extractor::{ExtractResult, Scope, execute_plans, render_script};
use mkvbulk::folder::{FolderIndex, Session, resolve_folder};
use mkvbulk::tracks::{JoinStyle, TrackKind, format_attachments, format_defaults, strip_markup};
use mkvbulk::utils::{DependencyStatus, init_logging};
use std::path::PathBuf;

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    config.validate()?;
    Ok(config)
}

/// Resolve the folder argument and scan it
fn open_folder(
    config: &AppConfig,
    folder: Option<&str>,
    join_style: JoinStyle,
) -> Result<Session> {
    let folder = folder.unwrap_or(".");
    let path = resolve_folder(folder)?;

    let probe = MkvmergeProbe::new(config.tools.mkvmerge.clone());
    let mut session = Session::new(Box::new(probe), config.scan.extensions.clone(), join_style);
    session
        .set_folder(&path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;
    Ok(session)
}

fn active_index(session: &Session) -> Result<&FolderIndex> {
    session.index().context("No folder loaded")
}

fn print_field(label: &str, text: &str, markup: bool) {
    let text = if markup {
        text.to_string()
    } else {
        strip_markup(text)
    };
    if text.is_empty() {
        println!("  {}: -", label);
    } else if text.contains('\n') {
        println!("  {}:", label);
        for line in text.lines() {
            println!("    {}", line);
        }
    } else {
        println!("  {}: {}", label, text);
    }
}

fn print_record(record: &FileRecord, style: JoinStyle, markup: bool) {
    println!("{}", record.file_name());
    if !record.title().is_empty() {
        print_field("Title", record.title(), true);
    }
    for kind in TrackKind::ALL {
        print_field(kind.display_name(), record.summary(kind, style), markup);
    }
    print_field("Defaults", &format_defaults(record, style), markup);
    print_field(
        "Chapters",
        if record.has_chapters() { "yes" } else { "no" },
        true,
    );
    print_field("Attachments", &format_attachments(record, style), markup);
    for diagnostic in record.diagnostics() {
        println!("  ! {}", diagnostic);
    }
}

fn list(
    config: &AppConfig,
    folder: Option<&str>,
    join: Option<JoinStyle>,
    markup: bool,
) -> Result<()> {
    let style = join.unwrap_or(config.display.join_style);
    let session = open_folder(config, folder, style)?;
    let index = active_index(&session)?;

    if index.records().is_empty() {
        println!("No media files in {}", index.folder().display());
    }
    for record in index.records() {
        print_record(record, index.join_style(), markup);
    }
    Ok(())
}

fn facets(config: &AppConfig, folder: Option<&str>) -> Result<()> {
    let session = open_folder(config, folder, config.display.join_style)?;
    let index = active_index(&session)?;

    for kind in TrackKind::ALL {
        let facets = index.facets().get(kind);
        println!("{}", kind.display_name());
        if facets.is_empty() {
            println!("  -");
            continue;
        }
        let join = |values: Vec<String>| values.join(", ");
        println!("  Languages: {}", join(facets.languages.iter().cloned().collect()));
        println!("  Codecs: {}", join(facets.codecs.iter().cloned().collect()));
        println!("  Ids: {}", join(facets.ids.iter().map(|id| id.to_string()).collect()));
    }
    Ok(())
}

fn plan(config: &AppConfig, folder: Option<&str>, scope: Scope) -> Result<()> {
    let session = open_folder(config, folder, config.display.join_style)?;
    let index = active_index(&session)?;
    print!("{}", render_script(&index.plans(scope), &config.tools.mkvextract));
    Ok(())
}

fn extract(config: &AppConfig, folder: Option<&str>, scope: Scope) -> Result<()> {
    let session = open_folder(config, folder, config.display.join_style)?;
    let index = active_index(&session)?;

    let outcomes = execute_plans(&index.plans(scope), &config.tools.mkvextract);
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            ExtractResult::Success { invocations } => {
                println!("{}: done ({} commands)", outcome.file_name, invocations)
            }
            ExtractResult::Skipped => println!("{}: nothing to do", outcome.file_name),
            ExtractResult::Error(errors) => {
                failed += 1;
                for error in errors {
                    eprintln!("{}: {}", outcome.file_name, error);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, outcomes.len());
    }
    Ok(())
}

fn deps(config: &AppConfig) -> Result<()> {
    let status = DependencyStatus::check(&config.tools);
    let describe = |ok: bool| if ok { "found" } else { "missing" };
    println!("{}: {}", config.tools.mkvmerge, describe(status.mkvmerge));
    println!("{}: {}", config.tools.mkvextract, describe(status.mkvextract));
    if !status.all_available() {
        bail!("MKVToolNix is not fully installed");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::List {
            folder,
            join,
            markup,
        } => list(&config, folder.as_deref(), join, markup),
        Commands::Facets { folder } => facets(&config, folder.as_deref()),
        Commands::Plan { folder, scope } => plan(
            &config,
            folder.as_deref(),
            scope.unwrap_or(config.extract.scope),
        ),
        Commands::Extract { folder, scope } => extract(
            &config,
            folder.as_deref(),
            scope.unwrap_or(config.extract.scope),
        ),
        Commands::Deps => deps(&config),
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => print!("{}", config.to_toml()?),
                ConfigAction::Path => {
                    let path = cli.config.unwrap_or_else(AppConfig::config_path);
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}
