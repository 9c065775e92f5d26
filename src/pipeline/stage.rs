//! 流水线阶段契约

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::state::PipelineState;

/// 流水线阶段：消费累计状态，产出以output_key命名的增量。
///
/// 约定：
/// - 阶段不得修改输入状态，增量由执行器合并；
/// - 阶段之间只通过状态通信；
/// - 协作方返回不可解析的数据属于数据质量问题，阶段必须就地兜底
///   （返回该键的良构默认值），不得向执行器抛出；
/// - 只有结构性缺陷（必需键缺失等）才以错误形式向上传播。
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// 阶段名称，用于日志
    fn name(&self) -> &'static str;

    /// 阶段输出在状态中的键名
    fn output_key(&self) -> &'static str;

    async fn execute(&self, context: &PipelineContext, state: &PipelineState) -> Result<Value>;
}
