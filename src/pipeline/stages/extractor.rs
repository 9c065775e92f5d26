//! Extractor阶段：从采集素材中抽取结构化实体

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::{PipelineState, StageKeys};
use crate::pipeline::types::{CollectedSources, ExtractionResult};
use crate::utils::json::parse_json_response;
use crate::utils::text::truncate_chars;

/// 每篇文档在prompt中保留的最大字符数
const DOCUMENT_EXCERPT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str =
    "You are a market intelligence analyst. You extract structured entities from research documents.";

#[derive(Default, Clone)]
pub struct Extractor;

impl Extractor {
    fn build_user_prompt(&self, collected: &CollectedSources) -> String {
        let mut corpus = String::new();
        for document in &collected.documents {
            corpus.push_str(&format!(
                "### Source: {}\n{}\n\n",
                document.url,
                truncate_chars(&document.content, DOCUMENT_EXCERPT_CHARS)
            ));
        }
        if corpus.is_empty() {
            corpus.push_str("(no documents were collected)\n");
        }

        format!(
            r#"Topic: "{}"

Research documents:
{}
Extract the recurring market themes, the competitors mentioned, and the named entities per document.
Return STRICT JSON:
{{
  "themes": ["..."],
  "competitors": ["..."],
  "documents": [{{"url": "...", "entities": ["..."]}}]
}}"#,
            collected.topic, corpus
        )
    }
}

#[async_trait]
impl PipelineStage for Extractor {
    fn name(&self) -> &'static str {
        "Extractor"
    }

    fn output_key(&self) -> &'static str {
        StageKeys::EXTRACTED
    }

    async fn execute(&self, context: &PipelineContext, state: &PipelineState) -> Result<Value> {
        let collected: CollectedSources = state.require_as(StageKeys::COLLECTED)?;

        let user_prompt = self.build_user_prompt(&collected);

        let mut extraction = match context.model.generate(SYSTEM_PROMPT, &user_prompt).await {
            Ok(response) => match parse_json_response::<ExtractionResult>(&response) {
                Ok(extraction) => extraction,
                Err(e) => {
                    eprintln!("⚠️ [Extractor] 实体抽取结果解析失败，使用空结果: {}", e);
                    ExtractionResult::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ [Extractor] 模型调用失败，使用空结果: {}", e);
                ExtractionResult::default()
            }
        };

        extraction.dedupe();
        println!(
            "🧪 [Extractor] 主题数: {}，竞争者数: {}",
            extraction.themes.len(),
            extraction.competitors.len()
        );

        Ok(serde_json::to_value(extraction)?)
    }
}
