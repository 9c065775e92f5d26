//! 各阶段的类型化输出

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::report::ImpactRadarEntry;

/// Collector阶段抓取到的单篇文档，仅在一次运行内存活
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub content: String,
}

/// Collector阶段的输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedSources {
    pub topic: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// 单篇文档的实体抽取结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntities {
    pub url: String,
    #[serde(default)]
    pub entities: Vec<String>,
}

/// Extractor阶段的输出
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub documents: Vec<DocumentEntities>,
}

impl ExtractionResult {
    /// 对themes与competitors去重，集合语义，不保序
    pub fn dedupe(&mut self) {
        self.themes = std::mem::take(&mut self.themes)
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        self.competitors = std::mem::take(&mut self.competitors)
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
    }
}

/// Impact阶段的输出，解析失败时各列表为空（永远良构）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    #[serde(default)]
    pub drivers: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub impacts: Vec<ImpactRadarEntry>,
}
