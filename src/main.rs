use anyhow::Result;
use clap::Parser;

use crate::pipeline::context::PipelineContext;
use crate::service::{AnalyzeRequest, ChatRequest};

mod cli;
mod config;
mod fetcher;
mod llm;
mod outlet;
mod pipeline;
mod rag;
mod report;
mod retrieval;
mod service;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.to_config()?;

    let context = PipelineContext::new(config)?;

    // 启动时检查模型连接
    context.check_connection().await?;

    match &args.command {
        cli::Command::Analyze {
            industry,
            from_date,
            to_date,
            focus,
        } => {
            let outcome = service::analyze(
                &context,
                AnalyzeRequest {
                    industry: industry.clone(),
                    from_date: from_date.clone(),
                    to_date: to_date.clone(),
                    focus: focus.clone(),
                },
            )
            .await?;

            println!("📄 报告编号: {}", outcome.report_id);
            println!("💾 报告已保存: {}", outcome.saved_file.display());
            println!("🧩 已入库分块数: {}", outcome.chunks_stored);
        }
        cli::Command::Chat {
            report_id,
            question,
        } => {
            let outcome = service::chat(
                &context,
                ChatRequest {
                    report_id: report_id.clone(),
                    question: question.clone(),
                },
            )
            .await?;

            println!("💬 {}", outcome.answer);
            if let Some(path) = &outcome.saved_file {
                println!("💾 问答记录已保存: {}", path.display());
            }
        }
    }

    Ok(())
}
