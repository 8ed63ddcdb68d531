// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 尝试将字符串解析为绝对的 http/https URL
///
/// 相对路径、非网络协议或无主机名的输入都返回 None。
pub fn parse_absolute(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str()?;
    Some(url)
}

/// 从URL路径推导下载文件名
///
/// 取路径最后一个非空段；路径为空时退回到带序号的占位名，
/// 保证同一批收割中的文件名不互相覆盖。
pub fn file_name_for(url: &Url, index: usize) -> String {
    url.path_segments()
        .and_then(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .next_back()
                .map(str::to_string)
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("asset-{}", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_accepts_http_and_https() {
        assert!(parse_absolute("http://example.com/a.pdf").is_some());
        assert!(parse_absolute("https://example.com/img/pic.jpg").is_some());
    }

    #[test]
    fn test_parse_absolute_rejects_relative_and_other_schemes() {
        assert!(parse_absolute("/img/pic.jpg").is_none());
        assert!(parse_absolute("pic.jpg").is_none());
        assert!(parse_absolute("ftp://example.com/a.zip").is_none());
        assert!(parse_absolute("mailto:someone@example.com").is_none());
        assert!(parse_absolute("not a url at all").is_none());
    }

    #[test]
    fn test_file_name_from_path() {
        let url = Url::parse("http://example.com/files/report.pdf?v=2").unwrap();
        assert_eq!(file_name_for(&url, 0), "report.pdf");
    }

    #[test]
    fn test_file_name_falls_back_to_index() {
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(file_name_for(&url, 3), "asset-3");
    }
}
