//! 配置校验模块
//!
//! 校验规则：
//! - source.path 非空
//! - source.encoding 是可识别的编码标签
//! - source.date_formats 至少一个且格式合法
//! - 列名非空且互不相同
//! - report.top_n >= 1
//! - sink 名称非空且唯一

use std::collections::HashSet;

use chrono::format::{Item, StrftimeItems};
use contracts::{ContractError, ReportBlueprint};

/// 校验 ReportBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    validate_source_path(blueprint)?;
    validate_encoding(blueprint)?;
    validate_date_formats(blueprint)?;
    validate_columns(blueprint)?;
    validate_report(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

/// 校验数据源路径
fn validate_source_path(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    if blueprint.source.path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "source.path",
            "source path cannot be empty",
        ));
    }
    Ok(())
}

/// 校验编码标签
fn validate_encoding(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let label = &blueprint.source.encoding;
    if encoding_rs::Encoding::for_label(label.trim().as_bytes()).is_none() {
        return Err(ContractError::config_validation(
            "source.encoding",
            format!("unknown encoding label '{label}'"),
        ));
    }
    Ok(())
}

/// 校验日期格式
fn validate_date_formats(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let formats = &blueprint.source.date_formats;
    if formats.is_empty() {
        return Err(ContractError::config_validation(
            "source.date_formats",
            "at least one date format is required",
        ));
    }

    for (idx, format) in formats.iter().enumerate() {
        let invalid = format.trim().is_empty()
            || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(ContractError::config_validation(
                format!("source.date_formats[{idx}]"),
                format!("invalid date format '{format}'"),
            ));
        }
    }
    Ok(())
}

/// 校验列名映射
fn validate_columns(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (field, header) in blueprint.source.columns.entries() {
        let header = header.trim();
        if header.is_empty() {
            return Err(ContractError::config_validation(
                format!("source.columns.{field}"),
                "column name cannot be empty",
            ));
        }
        if !seen.insert(header) {
            return Err(ContractError::config_validation(
                format!("source.columns.{field}"),
                format!("duplicate column name '{header}'"),
            ));
        }
    }
    Ok(())
}

/// 校验报表选项
fn validate_report(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    if blueprint.report.top_n == 0 {
        return Err(ContractError::config_validation(
            "report.top_n",
            "top_n must be >= 1",
        ));
    }
    Ok(())
}

/// 校验 sink 配置
fn validate_sinks(blueprint: &ReportBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{}].name", idx),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}
