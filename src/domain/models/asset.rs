// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// 资源类别
///
/// 收割到的资源按扩展名归入固定的类别子目录。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Pdf,
    Images,
    Documents,
    Archives,
    Others,
}

/// 扩展名到类别的固定映射表
static EXTENSION_TABLE: Lazy<HashMap<&'static str, AssetCategory>> = Lazy::new(|| {
    HashMap::from([
        ("pdf", AssetCategory::Pdf),
        ("jpg", AssetCategory::Images),
        ("jpeg", AssetCategory::Images),
        ("png", AssetCategory::Images),
        ("gif", AssetCategory::Images),
        ("doc", AssetCategory::Documents),
        ("docx", AssetCategory::Documents),
        ("zip", AssetCategory::Archives),
    ])
});

impl AssetCategory {
    /// 按扩展名归类，未知扩展名归入 others
    pub fn from_extension(extension: &str) -> Self {
        EXTENSION_TABLE
            .get(extension.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(AssetCategory::Others)
    }

    /// 按URL路径的扩展名归类
    pub fn for_url(url: &Url) -> Self {
        let extension = Path::new(url.path())
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    /// 类别子目录名
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetCategory::Pdf => "pdf",
            AssetCategory::Images => "images",
            AssetCategory::Documents => "documents",
            AssetCategory::Archives => "archives",
            AssetCategory::Others => "others",
        }
    }
}

/// 已落盘资源的清单条目
///
/// 收割过程中的临时描述符只在单次收割内存在，
/// 成功下载的条目进入结果的资源清单。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestedAsset {
    /// 资源来源URL
    pub url: String,
    /// 推断出的类别
    pub category: AssetCategory,
    /// 落盘路径
    pub path: PathBuf,
}
