//! 流水线累计状态
//!
//! 状态以"阶段键 -> 阶段输出"的形式按插入顺序累积。键只增不改：
//! 阶段只读取先行阶段的输出，增量由执行器统一合并，重复键视为
//! 结构性缺陷。

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 各阶段输出在状态中的键名
pub struct StageKeys;

impl StageKeys {
    pub const TOPIC: &'static str = "topic";
    pub const COLLECTED: &'static str = "collected";
    pub const EXTRACTED: &'static str = "extracted";
    pub const IMPACT: &'static str = "impact";
    pub const FINAL: &'static str = "final";
}

/// 单次流水线运行的累计状态，运行结束后即丢弃
#[derive(Debug)]
pub struct PipelineState {
    entries: Vec<(String, Value)>,
}

impl PipelineState {
    /// 创建初始状态，仅包含研究主题
    pub fn new(topic: &str) -> Self {
        Self {
            entries: vec![(
                StageKeys::TOPIC.to_string(),
                Value::String(topic.to_string()),
            )],
        }
    }

    /// 合并一个阶段的输出增量，键名重复说明阶段契约被破坏
    pub fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        if self.entries.iter().any(|(existing, _)| existing == key) {
            return Err(anyhow!("状态键 {} 已存在，阶段输出不允许覆盖", key));
        }
        self.entries.push((key.to_string(), value));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// 读取必需键，缺失视为结构性缺陷
    pub fn require_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .get(key)
            .ok_or_else(|| anyhow!("必需的状态键 {} 不可用", key))?;
        serde_json::from_value(value.clone())
            .map_err(|e| anyhow!("状态键 {} 的内容无法反序列化: {}", key, e))
    }

    /// 按创建顺序返回所有键
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }
}
