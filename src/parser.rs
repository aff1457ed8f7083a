//! # LRC 格式解析器
//!
//! 将原始 LRC 文本解析为按时间升序排列的 [`LrcLine`] 序列。
//!
//! 识别的行格式为一个或多个时间标签加上行文本，例如
//! `[00:10.00][00:12.50]共享文本`。时间标签支持 `[MM:SS]`、`[MM:SS.fff]`
//! 和 `[MM:SS:fff]` 三种写法，小数部分按秒的十进制小数解释
//! （`.5` 与 `.50` 均为 500 毫秒）。标签内可带 `-N` 后缀，
//! 表示该标签对应的行不参与跨轨道合并。

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::types::LrcLine;

/// 用于匹配一个完整的 LRC 歌词行，捕获时间戳部分和文本部分
static LRC_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\[\d+:\d+(?:[.:]\d+)?(?:-\d)?])+)(.*)$").expect("未能编译 LRC_LINE_REGEX")
});

/// 用于从一个时间戳组中提取出单个时间戳
static LRC_TIMESTAMP_EXTRACT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+):(\d+)(?:[.:](\d+))?(?:-(\d))?]")
        .expect("未能编译 LRC_TIMESTAMP_EXTRACT_REGEX")
});

/// 以这些前缀开头的行是署名信息，不参与跨轨道合并。
const CREDIT_PREFIXES: [&str; 3] = ["作词", "作曲", "编曲"];

/// 控制空文本行处理策略的解析选项。
///
/// `ignore_empty` 优先于 `merge_empty` 生效。
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// 无条件丢弃所有空文本行。
    pub ignore_empty: bool,
    /// 把连续的空行压缩为单个分隔行，并丢弃结尾的空行。
    ///
    /// 空行在 LRC 中常用来表示段落之间的停顿，保留一个即可。
    pub merge_empty: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_empty: false,
            merge_empty: true,
        }
    }
}

/// 解析 LRC 文本为按时间升序排列的歌词行。
///
/// 没有任何时间标签的行会被静默丢弃。一行带多个时间标签时，
/// 为每个标签各生成一行，文本相同。
#[must_use]
pub fn parse_lrc(content: &str, options: &ParseOptions) -> Vec<LrcLine> {
    let mut parsed: Vec<LrcLine> = Vec::new();

    for line_str in content.lines() {
        let Some(line_caps) = LRC_LINE_REGEX.captures(line_str) else {
            continue;
        };

        let all_timestamps_str = line_caps.get(1).map_or("", |m| m.as_str());
        let raw_text_part = line_caps.get(2).map_or("", |m| m.as_str());
        let text = raw_text_part.trim().replace('\u{3000}', " ");
        let is_credit_line = CREDIT_PREFIXES.iter().any(|p| text.starts_with(p));

        for ts_cap in LRC_TIMESTAMP_EXTRACT_REGEX.captures_iter(all_timestamps_str) {
            let fraction_str = ts_cap.get(3).map_or("", |m| m.as_str());
            let Some(time_ms) = timestamp_to_ms(&ts_cap[1], &ts_cap[2], fraction_str) else {
                warn!("无法解析的时间标签, 已丢弃: {}", &ts_cap[0]);
                continue;
            };
            let has_meta_suffix = ts_cap.get(4).is_some();

            parsed.push(LrcLine {
                time_ms,
                text: text.clone(),
                skip_merge: has_meta_suffix || is_credit_line,
            });
        }
    }

    if options.ignore_empty {
        parsed.retain(|line| !line.text.is_empty());
    } else if options.merge_empty {
        let mut kept: Vec<LrcLine> = Vec::with_capacity(parsed.len());
        for line in parsed {
            if !line.text.is_empty() || kept.last().is_some_and(|prev| !prev.text.is_empty()) {
                kept.push(line);
            }
        }
        if kept.last().is_some_and(|last| last.text.is_empty()) {
            kept.pop();
        }
        parsed = kept;
    }

    parsed.sort_by_key(|line| line.time_ms);
    parsed
}

/// 把 `分:秒.小数` 换算为毫秒。小数部分按 `0.<digits>` 秒解释并四舍五入。
fn timestamp_to_ms(minutes_str: &str, seconds_str: &str, fraction_str: &str) -> Option<u64> {
    let minutes: u64 = minutes_str.parse().ok()?;
    let seconds: u64 = seconds_str.parse().ok()?;

    let fraction_ms = if fraction_str.is_empty() {
        0
    } else {
        // 超过 9 位的小数没有意义，截断以防溢出
        let digits_str = &fraction_str[..fraction_str.len().min(9)];
        let digits: u64 = digits_str.parse().ok()?;
        let denominator = 10u64.checked_pow(u32::try_from(digits_str.len()).ok()?)?;
        (digits * 1000 + denominator / 2) / denominator
    };

    minutes
        .checked_mul(60_000)?
        .checked_add(seconds.checked_mul(1000)?)?
        .checked_add(fraction_ms)
}
