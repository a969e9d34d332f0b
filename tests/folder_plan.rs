use mkvbulk::AppError;
use mkvbulk::analyzer::Probe;
use mkvbulk::extractor::{ExtractionDirective, Scope, build_invocations, render_script};
use mkvbulk::folder::{FolderIndex, Session};
use mkvbulk::tracks::{JoinStyle, TrackKind, strip_markup};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Serves canned mkvmerge reports keyed by file name
struct CannedProbe {
    reports: HashMap<String, Value>,
}

impl Probe for CannedProbe {
    fn probe(&self, path: &Path) -> Result<Value, AppError> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        self.reports
            .get(&name)
            .cloned()
            .ok_or_else(|| AppError::probe_failure(&name, "mkvmerge exited with status 2"))
    }
}

fn canned_probe() -> CannedProbe {
    let mut reports = HashMap::new();
    reports.insert(
        "Episode 01.mkv".to_string(),
        json!({
            "container": {"recognized": true, "properties": {"title": "Pilot"}},
            "tracks": [
                {"id": 0, "type": "video", "codec": "AVC/H.264/MPEG-4p10",
                 "properties": {"language": "und", "display_dimensions": "1920x1080",
                                "default_track": true}},
                {"id": 1, "type": "audio", "codec": "AAC",
                 "properties": {"language": "jpn", "language_ietf": "ja", "default_track": true}},
                {"id": 2, "type": "audio", "codec": "AC-3",
                 "properties": {"language": "eng", "track_name": "Dub & Commentary"}},
                {"id": 3, "type": "subtitles", "codec": "SubStationAlpha",
                 "properties": {"language": "eng", "encoding": "UTF-8"}}
            ],
            "chapters": [{"num_entries": 6}],
            "attachments": [
                {"id": 1, "file_name": "OpenSans.ttf", "content_type": "font/ttf"}
            ]
        }),
    );
    reports.insert(
        "Episode 02.mkv".to_string(),
        json!({
            "container": {"properties": {}},
            "tracks": [
                {"id": 0, "type": "video", "codec": "HEVC/H.265/MPEG-H",
                 "properties": {"language": "und"}},
                {"id": 1, "type": "audio", "codec": "FLAC",
                 "properties": {"language": "jpn"}},
                {"id": 2, "type": "buttons", "codec": "VobButtons", "properties": {}}
            ]
        }),
    );
    reports.insert("Extras.mkv".to_string(), json!({"container": {}}));
    CannedProbe { reports }
}

fn folder_with(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

fn all_files() -> tempfile::TempDir {
    folder_with(&[
        "Episode 02.mkv",
        "Episode 01.mkv",
        "Extras.mkv",
        "Corrupt.mkv",
        "cover.jpg",
    ])
}

#[test]
fn folder_index_collects_records_and_facets() {
    let dir = all_files();
    let index = FolderIndex::build(
        dir.path(),
        &["mkv".to_string()],
        &canned_probe(),
        JoinStyle::OneLinePerEntry,
    )
    .unwrap();

    let names: Vec<&str> = index.records().iter().map(|r| r.file_name()).collect();
    assert_eq!(
        names,
        vec!["Corrupt.mkv", "Episode 01.mkv", "Episode 02.mkv", "Extras.mkv"]
    );

    let first = index.record("Episode 01.mkv").unwrap();
    assert_eq!(first.title(), "Pilot");
    assert_eq!(
        first.summary(TrackKind::Audio, JoinStyle::OneLinePerEntry),
        "<b>1-ja (AAC)</b>\n2-eng ('Dub &amp; Commentary' AC-3)"
    );
    assert_eq!(
        strip_markup(first.summary(TrackKind::Audio, JoinStyle::CommaJoined)),
        "1-ja (AAC), 2-eng ('Dub & Commentary' AC-3)"
    );

    let audio = index.facets().get(TrackKind::Audio);
    assert_eq!(
        audio.languages.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["eng", "ja", "jpn"]
    );
    assert_eq!(audio.ids.iter().copied().collect::<Vec<_>>(), vec![1, 2]);

    // Corrupt.mkv fails to probe and Episode 02 has a track of unknown type
    let diagnostics = index.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(diagnostics[0].1, AppError::ProbeFailure { .. }));
    assert!(matches!(diagnostics[1].1, AppError::UnknownTrackType { .. }));
}

#[test]
fn plans_and_script_for_the_whole_folder() {
    let dir = all_files();
    let index = FolderIndex::build(
        dir.path(),
        &["mkv".to_string()],
        &canned_probe(),
        JoinStyle::OneLinePerEntry,
    )
    .unwrap();

    let plans = index.plans(Scope::All);
    assert_eq!(plans.len(), 4);
    assert!(plans[0].is_noop());
    assert!(plans[3].is_noop());

    let first = &plans[1];
    assert_eq!(first.directives.len(), 5);
    assert_eq!(
        first.directives[2],
        ExtractionDirective::Tracks {
            kind: TrackKind::Subtitle,
            outputs: vec![(3, dir.path().join("Episode 01.track_3.eng.ssa"))],
        }
    );

    let invocations = build_invocations(first, "mkvextract");
    assert_eq!(invocations.len(), 3);
    let argv = invocations[0].argv();
    assert_eq!(argv[0], dir.path().join("Episode 01.mkv").to_string_lossy());
    assert_eq!(argv[1], "tracks");
    assert_eq!(argv.len(), 2 + 4);

    let script = render_script(&plans, "mkvextract");
    let headers: Vec<&str> = script.lines().filter(|l| l.starts_with('#')).collect();
    assert_eq!(
        headers,
        vec![
            "# Corrupt.mkv",
            "# Nothing to do...",
            "# Episode 01.mkv",
            "# Episode 02.mkv",
            "# Extras.mkv",
            "# Nothing to do...",
        ]
    );
    assert!(script.contains(&format!(
        "\"0:{}\"",
        dir.path().join("Episode 02.track_0.und.h265").display()
    )));
}

#[test]
fn subtitle_scope_only_touches_files_with_subtitles() {
    let dir = all_files();
    let index = FolderIndex::build(
        dir.path(),
        &["mkv".to_string()],
        &canned_probe(),
        JoinStyle::CommaJoined,
    )
    .unwrap();

    let active: Vec<String> = index
        .plans(Scope::Subtitle)
        .iter()
        .filter(|p| !p.is_noop())
        .map(|p| p.file_name.clone())
        .collect();
    assert_eq!(active, vec!["Episode 01.mkv"]);
}

#[test]
fn session_survives_a_bad_folder_switch() {
    let dir = folder_with(&["Episode 01.mkv"]);
    let mut session = Session::new(
        Box::new(canned_probe()),
        vec!["mkv".to_string()],
        JoinStyle::OneLinePerEntry,
    );
    session.set_folder(dir.path()).unwrap();

    let missing: PathBuf = dir.path().join("does-not-exist");
    let err = session.set_folder(missing).unwrap_err();
    assert!(matches!(err, AppError::InvalidFolder(_)));

    let index = session.index().unwrap();
    assert_eq!(index.folder(), dir.path());
    assert_eq!(index.records().len(), 1);
}
