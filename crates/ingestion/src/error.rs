//! Ingestion 错误类型

use contracts::PipelineStage;
use thiserror::Error;

/// Ingestion 错误
#[derive(Debug, Error)]
pub enum IngestionError {
    /// 数据源文件不存在
    #[error("source file not found: {path}")]
    SourceMissing {
        /// 文件路径
        path: String,
    },

    /// 读取失败
    #[error("cannot read {path}: {source}")]
    Read {
        /// 文件路径
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 无法识别的编码标签
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding {
        /// 编码标签
        label: String,
    },

    /// 字节流不符合声明的编码
    #[error("{path} is not valid {encoding} text")]
    Decode {
        /// 文件路径
        path: String,
        /// 编码名称
        encoding: &'static str,
    },

    /// 空文件 (无表头)
    #[error("{path} has no header row")]
    EmptySource {
        /// 文件路径
        path: String,
    },

    /// 缺少必需列
    #[error("missing required column '{column}' (for {field})")]
    MissingColumn {
        /// 表头名称
        column: String,
        /// 字段名
        field: &'static str,
    },

    /// CSV 结构错误
    #[error("malformed row at line {line}: {message}")]
    MalformedRow {
        /// 文件行号
        line: u64,
        /// 错误消息
        message: String,
    },

    /// 数值列解析失败
    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        /// 数据行号 (1-based)
        row: u64,
        /// 表头名称
        column: String,
        /// 原始值
        value: String,
    },

    /// 金额累计超出 `Amount` 可表示范围
    #[error("row {row}: column '{column}' exceeds the supported total amount range")]
    AmountOverflow {
        /// 数据行号 (1-based)
        row: u64,
        /// 表头名称
        column: String,
    },

    /// 日期解析失败
    #[error("row {row}: cannot parse date '{value}' with formats {formats:?}")]
    DateParse {
        /// 数据行号 (1-based)
        row: u64,
        /// 原始值
        value: String,
        /// 尝试过的格式
        formats: Vec<String>,
    },
}

impl IngestionError {
    /// 所属阶段
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::DateParse { .. } => PipelineStage::Parse,
            _ => PipelineStage::Load,
        }
    }
}

/// Ingestion Result 类型别名
pub type Result<T> = std::result::Result<T, IngestionError>;
