//! ReportBlueprint - Config Loader 输出
//!
//! 描述完整的报表配置：数据源、列映射、报表选项、输出路由。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的报表配置蓝图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 数据源设置
    pub source: SourceConfig,

    /// 报表选项
    #[serde(default)]
    pub report: ReportConfig,

    /// 输出路由配置
    #[serde(default = "default_sinks")]
    pub sinks: Vec<SinkConfig>,
}

impl ReportBlueprint {
    /// 仅指定数据源路径，其余使用默认值
    pub fn with_source_path(path: impl Into<PathBuf>) -> Self {
        Self {
            version: ConfigVersion::V1,
            source: SourceConfig::new(path),
            report: ReportConfig::default(),
            sinks: default_sinks(),
        }
    }
}

fn default_sinks() -> Vec<SinkConfig> {
    vec![SinkConfig {
        name: "terminal".to_string(),
        sink_type: SinkType::Terminal,
        params: HashMap::new(),
    }]
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// CSV 文件路径
    pub path: PathBuf,

    /// 文本编码 (WHATWG 标签, e.g. "latin1", "windows-1252", "utf-8")
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// 日期格式 (chrono strftime)，按顺序尝试
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,

    /// 列名映射
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: default_encoding(),
            date_formats: default_date_formats(),
            columns: ColumnMapping::default(),
        }
    }
}

fn default_encoding() -> String {
    "windows-1252".to_string()
}

fn default_date_formats() -> Vec<String> {
    vec!["%m/%d/%Y".to_string(), "%Y-%m-%d".to_string()]
}

/// 源文件表头名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub order_id: String,
    pub order_date: String,
    pub region: String,
    pub category: String,
    pub state: String,
    pub product_name: String,
    pub sales: String,
    pub profit: String,
}

impl ColumnMapping {
    /// (字段名, 表头名) 列表
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("order_id", &self.order_id),
            ("order_date", &self.order_date),
            ("region", &self.region),
            ("category", &self.category),
            ("state", &self.state),
            ("product_name", &self.product_name),
            ("sales", &self.sales),
            ("profit", &self.profit),
        ]
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            order_id: "Order ID".to_string(),
            order_date: "Order Date".to_string(),
            region: "Region".to_string(),
            category: "Category".to_string(),
            state: "State".to_string(),
            product_name: "Product Name".to_string(),
            sales: "Sales".to_string(),
            profit: "Profit".to_string(),
        }
    }
}

/// 报表选项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 标题
    pub title: String,

    /// 商品排行长度
    pub top_n: usize,

    /// 是否渲染州销售地图 (默认关闭)
    pub show_state_map: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Superstore Sales Dashboard".to_string(),
            top_n: 10,
            show_state_map: false,
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// 名称
    pub name: String,

    /// 类型
    pub sink_type: SinkType,

    /// 类型特定参数 (e.g. json sink 的 "path")
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// 输出类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// 终端文本报表
    Terminal,
    /// JSON 聚合结果
    Json,
    /// tracing 日志摘要
    Log,
}
