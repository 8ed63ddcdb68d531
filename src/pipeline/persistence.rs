// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::ExtractionOutcome;
use crate::domain::models::project::ProjectConfig;
use crate::utils::errors::ExtractError;
use chrono::Local;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

/// 将一次运行的记录写入带时间戳的运行目录
///
/// 目录命名为 `<项目名>-<时间戳>`，记录序列化为目录下的
/// `<项目名>.json`。文件形状是数组套数组：外层每个元素对应
/// 一次提取调用，内层是该次调用的记录序列。写盘前递归剪除
/// 空值，避免把占位的 null 和空串落到输出文件里。
///
/// # 返回值
///
/// * `Ok(PathBuf)` - 本次运行目录，资源收割以它为根
/// * `Err(ExtractError)` - 目录创建或文件写入失败
pub async fn persist(
    project: &ProjectConfig,
    outcome: &ExtractionOutcome,
) -> Result<PathBuf, ExtractError> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let run_dir = project
        .output_dir
        .join(format!("{}-{}", project.name, timestamp));
    tokio::fs::create_dir_all(&run_dir)
        .await
        .map_err(|e| ExtractError::PersistenceFailure(e.to_string()))?;

    let raw = serde_json::to_value(std::slice::from_ref(&outcome.records))
        .map_err(|e| ExtractError::PersistenceFailure(e.to_string()))?;
    let pruned = prune(&raw).unwrap_or_else(|| Value::Array(Vec::new()));
    let body = serde_json::to_string_pretty(&pruned)
        .map_err(|e| ExtractError::PersistenceFailure(e.to_string()))?;

    let file = run_dir.join(format!("{}.json", project.name));
    tokio::fs::write(&file, body)
        .await
        .map_err(|e| ExtractError::PersistenceFailure(e.to_string()))?;

    info!(
        path = %file.display(),
        records = outcome.records.len(),
        "Extraction results persisted"
    );
    Ok(run_dir)
}

/// 递归剪除空值
///
/// null、空白字符串、剪除后为空的数组和对象都被丢弃。
/// 整体被剪空时返回 None，由调用方决定占位形式。
pub fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => {
            let pruned: Vec<Value> = items.iter().filter_map(prune).collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Array(pruned))
            }
        }
        Value::Object(entries) => {
            let pruned: Map<String, Value> = entries
                .iter()
                .filter_map(|(key, item)| prune(item).map(|kept| (key.clone(), kept)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_drops_null_and_blank_strings() {
        let value = json!({ "a": null, "b": "  ", "c": "kept" });
        assert_eq!(prune(&value), Some(json!({ "c": "kept" })));
    }

    #[test]
    fn test_prune_collapses_empty_containers() {
        let value = json!({ "a": { "b": [null, ""] }, "c": [1, null] });
        assert_eq!(prune(&value), Some(json!({ "c": [1] })));
    }

    #[test]
    fn test_prune_of_all_empty_input_is_none() {
        assert_eq!(prune(&json!([{ "a": null }, ""])), None);
        assert_eq!(prune(&json!(null)), None);
    }

    #[test]
    fn test_prune_keeps_numbers_and_booleans() {
        let value = json!({ "count": 0, "flag": false });
        assert_eq!(prune(&value), Some(value.clone()));
    }
}
