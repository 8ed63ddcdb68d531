// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

/// 页面会话错误类型
///
/// 三种失败路径需要区分：元素立即探测不存在、等待窗口内
/// 条件未满足、其他浏览器或网络错误。分页遍历器据此决定
/// 结果严重级别。
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP请求失败
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 浏览器操作失败
    #[error("browser error: {0}")]
    Browser(String),

    /// 元素不存在（立即探测，区别于等待超时）
    #[error("no such element: {0}")]
    NotFound(String),

    /// 在等待窗口内条件未满足
    #[error("wait elapsed for '{0}'")]
    WaitTimeout(String),
}
