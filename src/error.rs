use thiserror::Error;

/// 定义轨道合并过程中可能发生的错误。
///
/// 解析本身是全函数：无法识别的行会被静默丢弃，不会报错。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// 输入的轨道集合中找不到指定的主轨道。
    #[error("合并轨道失败: 找不到主轨道 {0}")]
    MissingMainTrack(String),
}
