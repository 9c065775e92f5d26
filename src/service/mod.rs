//! 服务边界操作
//!
//! 核心对外只暴露两个操作：analyze跑完整流水线并把报告分块入库，
//! chat对已入库报告做检索增强问答。外层HTTP服务只是这两个函数的
//! 薄包装。

use anyhow::Result;
use std::path::PathBuf;

use crate::outlet;
use crate::pipeline;
use crate::pipeline::context::PipelineContext;
use crate::rag::{ChatExchange, NO_DATA_MESSAGE, QueryEngine, QueryOutcome};
use crate::report::Report;
use crate::retrieval::chunk_text;

/// 市场分析请求
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub industry: String,
    pub from_date: String,
    pub to_date: String,
    pub focus: Option<String>,
}

/// 市场分析结果
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub report_id: String,
    pub report: Report,
    pub saved_file: PathBuf,
    pub chunks_stored: usize,
}

/// 报告问答请求
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub report_id: String,
    pub question: String,
}

/// 报告问答结果
#[derive(Debug)]
pub struct ChatOutcome {
    pub answer: String,
    pub chunks_used: Vec<String>,
    pub saved_file: Option<PathBuf>,
}

/// 按模板拼装研究主题
pub fn build_topic(request: &AnalyzeRequest) -> String {
    let mut topic = format!(
        "{} market analysis from {} to {}",
        request.industry, request.from_date, request.to_date
    );
    if let Some(focus) = &request.focus {
        topic.push_str(&format!(" with focus on {}", focus));
    }
    topic
}

/// 运行流水线，保存报告并把分块写入检索索引
pub async fn analyze(context: &PipelineContext, request: AnalyzeRequest) -> Result<AnalyzeOutcome> {
    let topic = build_topic(&request);

    let report = pipeline::run(context, &topic).await?;

    // 报告编号为写出时刻的时间戳，秒级粒度内的碰撞可接受
    let report_id = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();

    let saved_file = outlet::save_report(&context.config, &request.industry, &report_id, &report)?;

    let index_config = &context.config.index;
    let chunks = chunk_text(
        &report.to_index_text(),
        index_config.chunk_size,
        index_config.chunk_overlap,
    )?;
    let chunks_stored = context.index.upsert(&report_id, &chunks).await?;

    println!("🧩 报告已分块入库: {} 块", chunks_stored);

    Ok(AnalyzeOutcome {
        report_id,
        report,
        saved_file,
        chunks_stored,
    })
}

/// 对指定报告进行检索增强问答
pub async fn chat(context: &PipelineContext, request: ChatRequest) -> Result<ChatOutcome> {
    let engine = QueryEngine::new(
        context.index.clone(),
        context.model.clone(),
        context.config.index.top_k,
    );

    match engine.answer(&request.report_id, &request.question).await? {
        QueryOutcome::NoData => Ok(ChatOutcome {
            answer: NO_DATA_MESSAGE.to_string(),
            chunks_used: vec![],
            saved_file: None,
        }),
        QueryOutcome::Answered {
            answer,
            chunks_used,
        } => {
            let exchange = ChatExchange {
                report_id: request.report_id,
                question: request.question,
                answer: answer.clone(),
                chunks_used: chunks_used.clone(),
            };
            let saved_file = outlet::save_chat(&context.config, &exchange)?;

            Ok(ChatOutcome {
                answer,
                chunks_used,
                saved_file: Some(saved_file),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_topic_without_focus() {
        let request = AnalyzeRequest {
            industry: "Fintech".to_string(),
            from_date: "2024-01-01".to_string(),
            to_date: "2024-06-01".to_string(),
            focus: None,
        };
        assert_eq!(
            build_topic(&request),
            "Fintech market analysis from 2024-01-01 to 2024-06-01"
        );
    }

    #[test]
    fn test_build_topic_with_focus() {
        let request = AnalyzeRequest {
            industry: "Fintech".to_string(),
            from_date: "2024-01-01".to_string(),
            to_date: "2024-06-01".to_string(),
            focus: Some("digital lending".to_string()),
        };
        assert_eq!(
            build_topic(&request),
            "Fintech market analysis from 2024-01-01 to 2024-06-01 with focus on digital lending"
        );
    }
}
