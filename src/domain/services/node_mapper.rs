// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Node, Selector};
use serde_json::{json, Value};

static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

/// 节点值映射
///
/// 纯函数：将一个匹配到的DOM节点映射为输出值。
/// 元素按类别分派；文本节点映射为去除首尾空白的文本；
/// 其他节点类型映射为其去除首尾空白的原始内容。永不失败，
/// 缺失的属性映射为空字符串而不是缺省键。
pub fn map_node(node: NodeRef<'_, Node>) -> Value {
    match node.value() {
        Node::Element(_) => ElementRef::wrap(node)
            .map(map_element)
            .unwrap_or_else(|| Value::String(String::new())),
        Node::Text(text) => Value::String(text.trim().to_string()),
        Node::Comment(comment) => Value::String(comment.trim().to_string()),
        Node::Doctype(doctype) => Value::String(doctype.name().trim().to_string()),
        Node::ProcessingInstruction(pi) => Value::String(pi.data.trim().to_string()),
        // Document and fragment containers carry no content of their own
        _ => Value::String(String::new()),
    }
}

/// 元素值映射，按元素类别分派
///
/// - 图片类元素 → `{src, alt}`，src为空时退回懒加载属性
/// - 媒体元素 → `{src, poster}`
/// - 超链接 → `{href, text}`
/// - 标题/段落 → 去除首尾空白的可见文本
/// - 列表容器 → 每个列表项文本组成的序列
/// - 其他元素 → 包含其内部标记的单元素序列
pub fn map_element(element: ElementRef<'_>) -> Value {
    let value = element.value();
    match value.name() {
        "img" => {
            let mut src = value.attr("src").unwrap_or_default();
            // Lazy-loaded images keep the real source in data-src
            if src.trim().is_empty() {
                src = value.attr("data-src").unwrap_or_default();
            }
            json!({
                "src": src,
                "alt": value.attr("alt").unwrap_or_default(),
            })
        }
        "video" => json!({
            "src": value.attr("src").unwrap_or_default(),
            "poster": value.attr("poster").unwrap_or_default(),
        }),
        "a" => json!({
            "href": value.attr("href").unwrap_or_default(),
            "text": visible_text(&element),
        }),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" => {
            Value::String(visible_text(&element))
        }
        "ul" | "ol" => Value::Array(
            element
                .select(&LIST_ITEM)
                .map(|item| Value::String(visible_text(&item)))
                .collect(),
        ),
        _ => Value::Array(vec![Value::String(
            element.inner_html().trim().to_string(),
        )]),
    }
}

fn visible_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
