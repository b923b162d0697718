// 蓝图规划阶段：知识体系摘要 + 学生画像 => 命题蓝图（ExamBlueprint）
// 蓝图可由模型规划，也可直接从配置的蓝图文件读取

use crate::generator::context::GeneratorContext;
use crate::generator::planning::blueprint_planner::BlueprintPlanner;
use crate::generator::planning::memory::{MemoryScope, ScopedKeys};
use crate::generator::preprocess::PreprocessingResult;
use crate::types::plan::ExamBlueprint;
use anyhow::Result;

pub mod blueprint_planner;
pub mod memory;

/// 执行蓝图规划阶段
pub async fn execute(
    context: &GeneratorContext,
    preprocessed: &PreprocessingResult,
) -> Result<ExamBlueprint> {
    let blueprint = BlueprintPlanner
        .plan(
            context,
            &preprocessed.knowledge_summary,
            &preprocessed.student_profile,
        )
        .await?;

    context
        .store_to_memory(MemoryScope::PLANNING, ScopedKeys::BLUEPRINT, &blueprint)
        .await?;
    Ok(blueprint)
}
