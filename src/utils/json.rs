//! 模型输出的JSON解析
//!
//! 模型返回的JSON经常被```json围栏包裹或夹杂说明文字，统一在这里
//! 清洗后解析。解析失败返回带类型的ParseFailure，由各阶段决定兜底值。

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use thiserror::Error;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("static regex"));

/// 模型输出无法解析为期望的JSON结构
#[derive(Debug, Error)]
#[error("模型输出无法解析为JSON: {source}")]
pub struct ParseFailure {
    #[from]
    source: serde_json::Error,
}

/// 清洗模型输出中的代码围栏与首尾杂质
pub fn clean_json_payload(raw: &str) -> &str {
    if let Some(captures) = CODE_FENCE.captures(raw) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str().trim();
        }
    }
    raw.trim()
}

/// 将模型输出解析为指定类型
pub fn parse_json_response<T: DeserializeOwned>(raw: &str) -> Result<T, ParseFailure> {
    let payload = clean_json_payload(raw);
    Ok(serde_json::from_str(payload)?)
}
