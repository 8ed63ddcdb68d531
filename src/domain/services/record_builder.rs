// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::{ExtractionOutcome, ExtractionRecord};
use crate::domain::models::project::FieldSpec;
use crate::domain::services::node_mapper;
use crate::utils::errors::ExtractError;
use scraper::{Html, Selector};
use tracing::debug;

/// 按字段规则从一页文档中装配记录
///
/// 每个字段的第 i 个匹配写入该页第 i 条记录；各字段匹配数
/// 不同时，该页记录数取所有字段匹配数的最大值，匹配数之外
/// 的记录不含该字段的键。字段级失败逐字段恢复：零匹配记录
/// 诊断并升为 Warning，无效定位表达式记录诊断并升为 Error，
/// 其余字段照常提取。
pub fn extract_page(
    html: &str,
    fields: &[FieldSpec],
    page_number: usize,
    paginated: bool,
    outcome: &mut ExtractionOutcome,
) -> Vec<ExtractionRecord> {
    let document = Html::parse_document(html);
    let mut records: Vec<ExtractionRecord> = Vec::new();

    for field in fields {
        if field.locator.trim().is_empty() {
            let err = ExtractError::FieldLocatorMissing {
                field: field.name.clone(),
            };
            outcome.diagnose(&field.name, err.to_string(), err.severity());
            continue;
        }

        let selector = match Selector::parse(&field.locator) {
            Ok(selector) => selector,
            Err(parse_error) => {
                let err = ExtractError::FieldLocatorInvalid {
                    field: field.name.clone(),
                    locator: field.locator.clone(),
                    message: parse_error.to_string(),
                };
                outcome.diagnose(&field.name, err.to_string(), err.severity());
                continue;
            }
        };

        let mut matched = 0usize;
        for (index, element) in document.select(&selector).enumerate() {
            if records.len() <= index {
                records.push(ExtractionRecord::new());
            }
            records[index].insert(field.name.clone(), node_mapper::map_node(*element));
            matched += 1;
        }

        if matched == 0 {
            let err = ExtractError::FieldNoMatch {
                field: field.name.clone(),
                locator: field.locator.clone(),
            };
            let message = if paginated {
                format!("{} on page {}", err, page_number)
            } else {
                err.to_string()
            };
            outcome.diagnose(&field.name, message, err.severity());
        } else {
            debug!(field = %field.name, matched, "Field extracted");
        }
    }

    records
}
