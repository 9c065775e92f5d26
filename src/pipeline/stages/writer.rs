//! Writer阶段：将分析结果写成固定模式的报告草稿

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::{PipelineState, StageKeys};
use crate::pipeline::types::{CollectedSources, ExtractionResult, ImpactAnalysis};
use crate::report::DraftReport;
use crate::utils::json::parse_json_response;

const SYSTEM_PROMPT: &str =
    "You are a market intelligence report writer. You turn analysis results into a structured report.";

#[derive(Default, Clone)]
pub struct Writer;

#[async_trait]
impl PipelineStage for Writer {
    fn name(&self) -> &'static str {
        "Writer"
    }

    fn output_key(&self) -> &'static str {
        StageKeys::FINAL
    }

    async fn execute(&self, context: &PipelineContext, state: &PipelineState) -> Result<Value> {
        let impact: ImpactAnalysis = state.require_as(StageKeys::IMPACT)?;
        let extraction: ExtractionResult = state.require_as(StageKeys::EXTRACTED)?;
        let collected: CollectedSources = state.require_as(StageKeys::COLLECTED)?;

        let user_prompt = format!(
            r#"Topic: "{}"

Impact analysis:
{}

Extracted entities:
{}

Consulted sources:
{}

Write the final market report.
Return STRICT JSON with exactly these keys:
{{
  "summary": "...",
  "drivers": ["..."],
  "competitors": ["..."],
  "impact_radar": [{{"event": "...", "impact_level": "High|Medium|Low", "score": 0, "why": ["..."], "actions": ["..."], "url": "..."}}],
  "opportunities": ["..."],
  "risks": ["..."],
  "90_day_plan": {{"0_30": ["..."], "30_60": ["..."], "60_90": ["..."]}},
  "sources": ["..."]
}}"#,
            collected.topic,
            serde_json::to_string_pretty(&impact)?,
            serde_json::to_string_pretty(&extraction)?,
            collected.sources.join("\n")
        );

        let mut draft = match context.model.generate(SYSTEM_PROMPT, &user_prompt).await {
            Ok(response) => match parse_json_response::<DraftReport>(&response) {
                Ok(draft) => draft,
                Err(e) => {
                    eprintln!("⚠️ [Writer] 报告草稿解析失败，使用空草稿: {}", e);
                    DraftReport::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ [Writer] 模型调用失败，使用空草稿: {}", e);
                DraftReport::default()
            }
        };

        // 模型遗漏时用上游阶段的真实数据补全溯源信息
        if draft.sources.is_none() && !collected.sources.is_empty() {
            draft.sources = Some(collected.sources.clone());
        }
        if draft.competitors.is_none() && !extraction.competitors.is_empty() {
            draft.competitors = Some(extraction.competitors.clone());
        }

        Ok(serde_json::to_value(draft)?)
    }
}
