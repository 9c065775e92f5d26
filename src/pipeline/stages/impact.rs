//! Impact阶段：从实体推导业务影响

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::{PipelineState, StageKeys};
use crate::pipeline::types::{ExtractionResult, ImpactAnalysis};
use crate::utils::json::parse_json_response;

const SYSTEM_PROMPT: &str =
    "You are a market impact analyst. You explain the business impact of market developments.";

#[derive(Default, Clone)]
pub struct ImpactAnalyzer;

#[async_trait]
impl PipelineStage for ImpactAnalyzer {
    fn name(&self) -> &'static str {
        "ImpactAnalyzer"
    }

    fn output_key(&self) -> &'static str {
        StageKeys::IMPACT
    }

    async fn execute(&self, context: &PipelineContext, state: &PipelineState) -> Result<Value> {
        let extraction: ExtractionResult = state.require_as(StageKeys::EXTRACTED)?;

        let user_prompt = format!(
            r#"Extracted market entities:
{}

Analyze the business impact of these findings.
Return STRICT JSON:
{{
  "drivers": ["..."],
  "risks": ["..."],
  "opportunities": ["..."],
  "impacts": [{{"event": "...", "impact_level": "High|Medium|Low", "score": 0, "why": ["..."], "actions": ["..."], "url": "..."}}]
}}"#,
            serde_json::to_string_pretty(&extraction)?
        );

        let analysis = match context.model.generate(SYSTEM_PROMPT, &user_prompt).await {
            Ok(response) => match parse_json_response::<ImpactAnalysis>(&response) {
                Ok(analysis) => analysis,
                Err(e) => {
                    eprintln!("⚠️ [ImpactAnalyzer] 影响分析解析失败，使用空结果: {}", e);
                    ImpactAnalysis::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ [ImpactAnalyzer] 模型调用失败，使用空结果: {}", e);
                ImpactAnalysis::default()
            }
        };

        println!(
            "📊 [ImpactAnalyzer] 驱动因素: {}，风险: {}，机会: {}",
            analysis.drivers.len(),
            analysis.risks.len(),
            analysis.opportunities.len()
        );

        Ok(serde_json::to_value(analysis)?)
    }
}
