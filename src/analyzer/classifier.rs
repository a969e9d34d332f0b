use crate::tracks::TrackKind;

/// How a rule compares its needles against the upper-cased codec string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Contains,
    Exact,
}

/// One classification rule: any needle hits, the extension wins
#[derive(Debug)]
struct Rule {
    needles: &'static [&'static str],
    matching: Match,
    extension: &'static str,
}

const fn contains(needles: &'static [&'static str], extension: &'static str) -> Rule {
    Rule {
        needles,
        matching: Match::Contains,
        extension,
    }
}

const fn exact(needles: &'static [&'static str], extension: &'static str) -> Rule {
    Rule {
        needles,
        matching: Match::Exact,
        extension,
    }
}

// Order matters: the first matching rule wins.

const VIDEO_RULES: &[Rule] = &[
    contains(&["MPEG1", "MPEG2", "MPEG-1", "MPEG-2"], "mpg"),
    contains(&["AVC"], "h264"),
    contains(&["HEVC"], "h265"),
    contains(&["FOURCC"], "avi"),
    contains(&["REAL"], "rm"),
    exact(&["V_THEORA", "THEORA"], "ogg"),
    contains(&["VP8", "VP9"], "ivf"),
];

const AUDIO_RULES: &[Rule] = &[
    contains(&["AAC"], "aac"),
    contains(&["AC3", "AC-3"], "ac3"),
    contains(&["ALAC"], "caf"),
    contains(&["DTS"], "dts"),
    contains(&["FLAC"], "flac"),
    contains(&["MPEG/L2", "MP2"], "mp2"),
    contains(&["MPEG/L3", "MP3"], "mp3"),
    contains(&["OPUS"], "ogg"),
    contains(&["PCM"], "wav"),
    contains(&["REAL"], "ra"),
    contains(&["TRUEHD"], "thd"),
    contains(&["MLP"], "mlp"),
    contains(&["TTA1"], "tta"),
    contains(&["VORBIS"], "ogg"),
    contains(&["WAVPACK4"], "wv"),
];

const SUBTITLE_RULES: &[Rule] = &[
    contains(&["PGS"], "sup"),
    contains(&["ASS"], "ass"),
    contains(&["SSA", "SUBSTATIONALPHA"], "ssa"),
    contains(&["SUBRIP", "SRT", "S_TEXT/UTF8", "S_TEXT/ASCII"], "srt"),
    contains(&["VOBSUB"], "sub"),
    contains(&["USF"], "usf"),
    contains(&["WEBVTT"], "vtt"),
];

fn rules_for(kind: TrackKind) -> &'static [Rule] {
    match kind {
        TrackKind::Video => VIDEO_RULES,
        TrackKind::Audio => AUDIO_RULES,
        TrackKind::Subtitle => SUBTITLE_RULES,
    }
}

/// Output file extension (without the dot) the extraction tool writes for a
/// codec, or an empty string when the codec is not recognised.
pub fn extension_for(kind: TrackKind, codec: &str) -> &'static str {
    let codec = codec.trim().to_uppercase();

    rules_for(kind)
        .iter()
        .find(|rule| {
            rule.needles.iter().any(|needle| match rule.matching {
                Match::Contains => codec.contains(needle),
                Match::Exact => codec == *needle,
            })
        })
        .map(|rule| rule.extension)
        .unwrap_or("")
}
