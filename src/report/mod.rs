//! 市场报告的终态模式与装配器
//!
//! 报告是一次流水线运行的终点产物：九个字段全部非空、结构固定。
//! Writer阶段的草稿允许字段缺失，装配器负责用静态兜底值补齐，
//! 从而保证"永不输出半空报告"。

use serde::{Deserialize, Serialize};

pub mod defaults;

/// 影响雷达中的单个事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRadarEntry {
    pub event: String,
    pub impact_level: String,
    pub score: u32,
    #[serde(default)]
    pub why: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// 90天行动计划，三个固定阶段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NinetyDayPlan {
    #[serde(rename = "0_30")]
    pub phase_0_30: Vec<String>,
    #[serde(rename = "30_60")]
    pub phase_30_60: Vec<String>,
    #[serde(rename = "60_90")]
    pub phase_60_90: Vec<String>,
}

/// Writer阶段产出的报告草稿，所有字段可缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftReport {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub drivers: Option<Vec<String>>,
    #[serde(default)]
    pub competitors: Option<Vec<String>>,
    #[serde(default)]
    pub impact_radar: Option<Vec<ImpactRadarEntry>>,
    #[serde(default)]
    pub opportunities: Option<Vec<String>>,
    #[serde(default)]
    pub risks: Option<Vec<String>>,
    #[serde(default, rename = "90_day_plan")]
    pub ninety_day_plan: Option<NinetyDayPlan>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

/// 终态市场报告，九字段固定模式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub summary: String,
    pub drivers: Vec<String>,
    pub competitors: Vec<String>,
    pub impact_radar: Vec<ImpactRadarEntry>,
    pub opportunities: Vec<String>,
    pub risks: Vec<String>,
    #[serde(rename = "90_day_plan")]
    pub ninety_day_plan: NinetyDayPlan,
    pub sources: Vec<String>,
}

impl Report {
    /// 将草稿装配为完整报告，缺失字段回填静态兜底值
    pub fn assemble(draft: DraftReport) -> Self {
        Self {
            summary: draft.summary.unwrap_or_else(defaults::summary),
            drivers: draft.drivers.unwrap_or_else(defaults::drivers),
            competitors: draft.competitors.unwrap_or_else(defaults::competitors),
            impact_radar: draft.impact_radar.unwrap_or_else(defaults::impact_radar),
            opportunities: draft.opportunities.unwrap_or_else(defaults::opportunities),
            risks: draft.risks.unwrap_or_else(defaults::risks),
            ninety_day_plan: draft.ninety_day_plan.unwrap_or_else(defaults::ninety_day_plan),
            sources: draft.sources.unwrap_or_else(defaults::sources),
        }
    }

    /// 报告的可检索文本形式，用于分块入库
    pub fn to_index_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
