//! 标准三轨道歌词处理管线。

use tracing::debug;

use crate::error::MergeError;
use crate::merger::{MergeOptions, merge_tracks};
use crate::parser::{ParseOptions, parse_lrc};
use crate::types::{LrcGroupLine, LrcLine, TrackKind};

/// 次轨道相对主轨道的匹配容差。
///
/// 翻译和罗马音通常是独立转写的，时间戳偏差较大，容差放宽到一秒。
const MERGE_THRESHOLD_MS: u64 = 1000;

/// 解析并合并原文、翻译、罗马音三条轨道。
///
/// 缺失或解析不出任何行的轨道会被忽略；三条轨道都为空时返回空序列。
/// 主轨道中的署名行会归入 [`TrackKind::Metadata`]。
///
/// # Errors
///
/// 原文轨道为空但翻译或罗马音解析出了歌词行时，返回
/// [`MergeError::MissingMainTrack`]。
pub fn process_lyrics(
    original: &str,
    translation: Option<&str>,
    romanization: Option<&str>,
) -> Result<Vec<LrcGroupLine<TrackKind>>, MergeError> {
    let parse_options = ParseOptions::default();
    let mut tracks: Vec<(TrackKind, Vec<LrcLine>)> = Vec::new();

    let inputs = [
        (TrackKind::Main, Some(original)),
        (TrackKind::Translation, translation),
        (TrackKind::Romanization, romanization),
    ];
    for (kind, content) in inputs {
        let Some(content) = content else { continue };
        if content.is_empty() {
            continue;
        }
        let lines = parse_lrc(content, &parse_options);
        if lines.is_empty() {
            debug!("轨道 {} 未解析出任何歌词行, 已忽略", kind);
        } else {
            tracks.push((kind, lines));
        }
    }

    if tracks.is_empty() {
        return Ok(Vec::new());
    }

    merge_tracks(
        tracks,
        &MergeOptions {
            main_track: TrackKind::Main,
            threshold_ms: MERGE_THRESHOLD_MS,
            skip_merge_track: Some(TrackKind::Metadata),
            replace_empty_line: None,
        },
    )
}
