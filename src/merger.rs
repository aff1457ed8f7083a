//! 多轨道歌词合并。
//!
//! 以主轨道为时间轴，把翻译、罗马音等次轨道的行在容差窗口内
//! 对齐到主轨道的行上。次轨道假定按时间单调排列、与主轨道大致
//! 对齐，但允许多行或缺行：每个次轨道维护一个只进不退的游标，
//! 匹配命中时连同被跳过的行一起消费掉。

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::MergeError;
use crate::types::{LrcGroupLine, LrcLine};

/// 未匹配的次轨道剩余行统一追加在最后一行输出之后的固定间隔。
const LEFTOVER_EXTENSION_GAP_MS: u64 = 1000;

/// 轨道合并选项。
#[derive(Debug, Clone)]
pub struct MergeOptions<K> {
    /// 驱动整体时间轴的主轨道键。
    pub main_track: K,
    /// 次轨道的时间匹配容差（毫秒），匹配区间为
    /// `[t - threshold, t + threshold)`。
    pub threshold_ms: u64,
    /// 主轨道中 `skip_merge` 行在输出中改用的轨道键。
    ///
    /// 用于把署名等元数据行与真正的主歌词区分开。未设置时仍使用主轨道键。
    pub skip_merge_track: Option<K>,
    /// 若设置，主轨道的空文本行会替换为该文本（并标记为 `skip_merge`），
    /// 而不是被跳过。
    pub replace_empty_line: Option<String>,
}

impl<K> MergeOptions<K> {
    /// 创建默认选项：容差 20 毫秒，不分离元数据行，不替换空行。
    #[must_use]
    pub fn new(main_track: K) -> Self {
        Self {
            main_track,
            threshold_ms: 20,
            skip_merge_track: None,
            replace_empty_line: None,
        }
    }
}

/// 次轨道上的前进游标。已消费的行不会被重新扫描。
struct TrackCursor<K> {
    key: K,
    lines: Vec<LrcLine>,
    pos: usize,
}

impl<K> TrackCursor<K> {
    fn remaining(&self) -> &[LrcLine] {
        &self.lines[self.pos..]
    }
}

/// 把若干歌词轨道合并为时间同步的序列。
///
/// `tracks` 的顺序决定次轨道的匹配顺序。输入的每个轨道都应当已按
/// 时间升序排列（[`crate::parser::parse_lrc`] 的输出满足该要求）。
///
/// # Errors
///
/// `tracks` 中找不到 `options.main_track` 时返回
/// [`MergeError::MissingMainTrack`]。
pub fn merge_tracks<K>(
    tracks: Vec<(K, Vec<LrcLine>)>,
    options: &MergeOptions<K>,
) -> Result<Vec<LrcGroupLine<K>>, MergeError>
where
    K: Eq + Hash + Clone + Debug,
{
    let mut tracks = tracks;

    // 每个轨道先去掉结尾的空行
    for (_, lines) in &mut tracks {
        while lines.last().is_some_and(|line| line.text.is_empty()) {
            lines.pop();
        }
    }

    let main_index = tracks
        .iter()
        .position(|(key, _)| *key == options.main_track)
        .ok_or_else(|| MergeError::MissingMainTrack(format!("{:?}", options.main_track)))?;
    let (_, mut main_lines) = tracks.remove(main_index);

    if let Some(replacement) = &options.replace_empty_line {
        for line in &mut main_lines {
            if line.text.is_empty() {
                line.text = replacement.clone();
                line.skip_merge = true;
            }
        }
    }

    let mut secondaries: Vec<TrackCursor<K>> = tracks
        .into_iter()
        .map(|(key, lines)| TrackCursor { key, lines, pos: 0 })
        .collect();

    let mut merged: Vec<LrcGroupLine<K>> = Vec::with_capacity(main_lines.len());

    for main_line in &main_lines {
        if main_line.text.is_empty() {
            continue;
        }

        let main_key = match &options.skip_merge_track {
            Some(key) if main_line.skip_merge => key.clone(),
            _ => options.main_track.clone(),
        };
        let mut group = LrcGroupLine {
            time_ms: main_line.time_ms,
            tracks: HashMap::from([(main_key, main_line.text.clone())]),
        };

        if !main_line.skip_merge {
            let window_start = main_line.time_ms.saturating_sub(options.threshold_ms);
            let window_end = main_line.time_ms.saturating_add(options.threshold_ms);

            for secondary in &mut secondaries {
                // 空文本行不可匹配，但命中时会随其它被越过的行一起消费
                let found = secondary.remaining().iter().position(|candidate| {
                    !candidate.text.is_empty()
                        && candidate.time_ms >= window_start
                        && candidate.time_ms < window_end
                });
                if let Some(offset) = found {
                    let matched = &secondary.lines[secondary.pos + offset];
                    trace!(
                        "主行 [{}ms] 匹配到次轨道 {:?} 的行 [{}ms]: '{}'",
                        main_line.time_ms, secondary.key, matched.time_ms, matched.text
                    );
                    group.tracks.insert(secondary.key.clone(), matched.text.clone());
                    secondary.pos += offset + 1;
                }
            }
        }

        merged.push(group);
    }

    // 次轨道多出来的行统一挂在末尾，按剩余位置对齐
    let max_leftover = secondaries
        .iter()
        .map(|s| s.remaining().len())
        .max()
        .unwrap_or(0);
    if max_leftover > 0 {
        let extension_time = merged
            .last()
            .map_or(0, |line| line.time_ms)
            .saturating_add(LEFTOVER_EXTENSION_GAP_MS);
        debug!(
            "有 {} 行次轨道歌词未匹配到主轨道, 追加到 {}ms",
            max_leftover, extension_time
        );

        let mut extra_lines: Vec<LrcGroupLine<K>> = (0..max_leftover)
            .map(|_| LrcGroupLine {
                time_ms: extension_time,
                tracks: HashMap::new(),
            })
            .collect();
        for secondary in &secondaries {
            for (extra, leftover) in extra_lines.iter_mut().zip(secondary.remaining()) {
                if !leftover.text.is_empty() {
                    extra.tracks.insert(secondary.key.clone(), leftover.text.clone());
                }
            }
        }
        merged.extend(extra_lines);
    }

    Ok(merged)
}
