//! 歌词数据模型。

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// 一行解析后的歌词。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LrcLine {
    /// 行时间戳（毫秒）。
    pub time_ms: u64,
    /// 行文本。已去除首尾空白，可能为空。
    pub text: String,
    /// 该行是否禁止参与跨轨道时间匹配。
    ///
    /// 时间标签带 `-N` 后缀、或文本以署名前缀开头的行会被标记。
    #[serde(default)]
    pub skip_merge: bool,
}

impl LrcLine {
    /// 创建一行普通歌词（不禁止合并）。
    #[must_use]
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
            skip_merge: false,
        }
    }
}

/// 合并后的一行歌词，按轨道键聚合各轨道在该时间点的文本。
///
/// 只有在该时间点贡献了非空文本的轨道才会出现在 `tracks` 中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LrcGroupLine<K: Eq + Hash> {
    /// 行时间戳（毫秒），取自主轨道。
    pub time_ms: u64,
    /// 轨道键到文本的映射。
    pub tracks: HashMap<K, String>,
}

/// 标准三轨道管线使用的轨道类型。
///
/// 变体声明顺序即渲染端的展示优先级：主歌词最先，元数据最后。
/// 字符串形式与各音乐平台返回的轨道名一致（`main`/`roma`/`trans`/`meta`）。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// 主歌词，驱动整体时间轴。
    Main,
    /// 罗马音。
    #[strum(serialize = "roma")]
    #[serde(rename = "roma")]
    Romanization,
    /// 翻译。
    #[strum(serialize = "trans")]
    #[serde(rename = "trans")]
    Translation,
    /// 元数据行（作词、作曲等署名信息）。
    #[strum(serialize = "meta")]
    #[serde(rename = "meta")]
    Metadata,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_track_kind_string_roundtrip() {
        assert_eq!(TrackKind::Main.to_string(), "main");
        assert_eq!(TrackKind::Romanization.to_string(), "roma");
        assert_eq!(TrackKind::Translation.to_string(), "trans");
        assert_eq!(TrackKind::Metadata.to_string(), "meta");

        assert_eq!(TrackKind::from_str("roma").unwrap(), TrackKind::Romanization);
        assert_eq!(TrackKind::from_str("TRANS").unwrap(), TrackKind::Translation);
        assert!(TrackKind::from_str("unknown").is_err());
    }

    #[test]
    fn test_track_kind_display_priority() {
        let mut kinds = vec![
            TrackKind::Metadata,
            TrackKind::Translation,
            TrackKind::Main,
            TrackKind::Romanization,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![
                TrackKind::Main,
                TrackKind::Romanization,
                TrackKind::Translation,
                TrackKind::Metadata,
            ]
        );
    }
}
