//! 市场研究流水线执行器
//!
//! 固定的线性四阶段：Collect → Extract → Analyze-Impact → Write。
//! 阶段之间没有分支、重试或并行；每个阶段的输入是先行阶段的累计
//! 输出，因此天然串行。数据质量问题由各阶段就地兜底，执行器只在
//! 结构性缺陷时失败。

use anyhow::Result;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::stages::{Collector, Extractor, ImpactAnalyzer, Writer};
use crate::pipeline::state::{PipelineState, StageKeys};
use crate::report::{DraftReport, Report};

pub mod context;
pub mod stage;
pub mod stages;
pub mod state;
pub mod types;

/// 构建固定的四阶段链
fn default_stages() -> Vec<Box<dyn PipelineStage>> {
    vec![
        Box::new(Collector),
        Box::new(Extractor),
        Box::new(ImpactAnalyzer),
        Box::new(Writer),
    ]
}

/// 顺序执行给定的阶段链，返回累计状态
pub async fn run_stages(
    context: &PipelineContext,
    topic: &str,
    stages: &[Box<dyn PipelineStage>],
) -> Result<PipelineState> {
    let mut state = PipelineState::new(topic);

    for stage in stages {
        println!("🤖 执行 {} 阶段...", stage.name());
        let delta = stage.execute(context, &state).await?;
        state.insert(stage.output_key(), delta)?;
        println!("✓ {} 阶段完成", stage.name());
    }

    Ok(state)
}

/// 执行市场研究流水线并装配终态报告
pub async fn run(context: &PipelineContext, topic: &str) -> Result<Report> {
    println!("🚀 开始执行市场研究流水线: {}", topic);

    let state = run_stages(context, topic, &default_stages()).await?;

    let draft: DraftReport = state.require_as(StageKeys::FINAL)?;
    let report = Report::assemble(draft);

    println!("✓ 流水线执行完毕");
    Ok(report)
}
