// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::asset::{AssetCategory, HarvestedAsset};
use crate::domain::models::outcome::ExtractionRecord;
use crate::utils::errors::ExtractError;
use crate::utils::url_utils;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};
use url::Url;

/// 资源收割器
///
/// 扫描记录中的全部字符串叶子，把能解析为绝对 http/https
/// URL 的值当作候选资源，逐个下载到运行目录的类别子目录。
/// 单个资源失败只记日志并跳过，从不中断整批收割，也不影响
/// 运行状态。
pub struct AssetHarvester<'a> {
    client: &'a reqwest::Client,
}

impl<'a> AssetHarvester<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// 收割一次运行的全部候选资源
    ///
    /// # 参数
    ///
    /// * `records` - 本次运行装配出的记录
    /// * `run_dir` - 本次运行目录，资源落盘到其 `assets/` 下
    ///
    /// # 返回值
    ///
    /// 成功落盘的资源清单，失败的候选不出现在清单中
    pub async fn harvest(
        &self,
        records: &[ExtractionRecord],
        run_dir: &Path,
    ) -> Vec<HarvestedAsset> {
        let snapshot = match serde_json::to_value(records) {
            Ok(value) => value,
            Err(e) => {
                warn!("Asset scan skipped, records not serializable: {}", e);
                return Vec::new();
            }
        };

        let mut urls = Vec::new();
        collect_urls(&snapshot, &mut urls);
        let mut seen = HashSet::new();
        urls.retain(|url| seen.insert(url.to_string()));

        let mut harvested = Vec::new();
        for (index, url) in urls.iter().enumerate() {
            match self.download(url, index, run_dir).await {
                Ok(asset) => {
                    debug!(url = %asset.url, path = %asset.path.display(), "Asset saved");
                    harvested.push(asset);
                }
                Err(err) => warn!("Asset skipped: {}", err),
            }
        }

        info!(
            candidates = urls.len(),
            saved = harvested.len(),
            "Asset harvest finished"
        );
        harvested
    }

    async fn download(
        &self,
        url: &Url,
        index: usize,
        run_dir: &Path,
    ) -> Result<HarvestedAsset, ExtractError> {
        let failure = |message: String| ExtractError::AssetDownloadFailure {
            url: url.to_string(),
            message,
        };

        let category = AssetCategory::for_url(url);
        let dir = run_dir.join("assets").join(category.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| failure(e.to_string()))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| failure(e.to_string()))?;
        let bytes = response.bytes().await.map_err(|e| failure(e.to_string()))?;

        let path = dir.join(url_utils::file_name_for(url, index));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| failure(e.to_string()))?;

        Ok(HarvestedAsset {
            url: url.to_string(),
            category,
            path,
        })
    }
}

/// 递归收集字符串叶子里的绝对URL
fn collect_urls(value: &Value, urls: &mut Vec<Url>) {
    match value {
        Value::String(candidate) => {
            if let Some(url) = url_utils::parse_absolute(candidate) {
                urls.push(url);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_urls(item, urls);
            }
        }
        Value::Object(entries) => {
            for item in entries.values() {
                collect_urls(item, urls);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_urls_scans_nested_string_leaves() {
        let value = json!([
            {
                "title": "Quarterly report",
                "download": { "href": "http://example.com/files/report.pdf", "text": "PDF" },
                "image": { "src": "https://example.com/img/cover.png", "alt": "" }
            },
            { "note": "/relative/skipped.pdf" }
        ]);

        let mut urls = Vec::new();
        collect_urls(&value, &mut urls);

        let collected: Vec<String> = urls.iter().map(Url::to_string).collect();
        assert_eq!(
            collected,
            vec![
                "http://example.com/files/report.pdf".to_string(),
                "https://example.com/img/cover.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_collect_urls_ignores_non_string_values() {
        let mut urls = Vec::new();
        collect_urls(&json!({ "n": 7, "b": true, "x": null }), &mut urls);
        assert!(urls.is_empty());
    }
}
