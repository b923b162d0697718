// 命题阶段：蓝图 => 分发任务 => 按题型并发生成 => 汇总题目

use anyhow::{Context, Result};

use crate::generator::compose::handlers::{LlmQuestionDrafter, QuestionDrafter, handle};
use crate::generator::compose::memory::{MemoryScope, ScopedKeys};
use crate::generator::compose::router::{RoutingInputs, route};
use crate::generator::compose::types::ScatterTask;
use crate::generator::context::GeneratorContext;
use crate::generator::preprocess::PreprocessingResult;
use crate::types::plan::ExamBlueprint;
use crate::types::question::GeneratedQuestion;
use crate::utils::threads::try_parallel_with_limit;

pub mod collector;
pub mod handlers;
pub mod memory;
pub mod router;
pub mod types;

/// 将蓝图展开为分发任务并写入记忆
pub async fn plan_tasks(
    context: &GeneratorContext,
    preprocessed: &PreprocessingResult,
    blueprint: &ExamBlueprint,
) -> Result<Vec<ScatterTask>> {
    let course_name = context.config.get_course_name();
    let profile = preprocessed.student_profile.summary();
    let digest = preprocessed.knowledge_summary.digest();

    let tasks = route(
        &blueprint.items,
        &preprocessed.knowledge_summary.detail_map,
        RoutingInputs {
            course_name: &course_name,
            student_profile: &profile,
            knowledge_digest: &digest,
            plan_strategy: &blueprint.strategy,
        },
    );
    tracing::info!("🧭 命题任务拆分完成，共 {} 道题", tasks.len());

    context
        .store_to_memory(MemoryScope::COMPOSE, ScopedKeys::TASKS, &tasks)
        .await?;
    Ok(tasks)
}

/// 执行命题阶段，使用模型生成题目
pub async fn execute(
    context: &GeneratorContext,
    tasks: &[ScatterTask],
) -> Result<Vec<GeneratedQuestion>> {
    let drafter = LlmQuestionDrafter::new(context.clone());
    let questions = generate(&drafter, tasks, context.config.llm.max_parallels).await?;

    context
        .store_to_memory(MemoryScope::COMPOSE, ScopedKeys::QUESTIONS, &questions)
        .await?;
    Ok(questions)
}

/// 以有限并发分发全部任务，任一任务失败即整体失败
pub async fn generate(
    drafter: &dyn QuestionDrafter,
    tasks: &[ScatterTask],
    max_parallels: usize,
) -> Result<Vec<GeneratedQuestion>> {
    tracing::info!(
        "🤖 开始生成题目：{} 道题，最大并发 {}",
        tasks.len(),
        max_parallels
    );

    let futures: Vec<_> = tasks
        .iter()
        .map(|task| async move {
            handle(drafter, task)
                .await
                .map(|question| vec![question])
                .with_context(|| {
                    format!(
                        "第 {} 题（{}）生成失败",
                        task.payload.order,
                        task.handler.display_name()
                    )
                })
        })
        .collect();

    let buckets = try_parallel_with_limit(futures, max_parallels).await?;
    let questions = collector::collect(buckets);

    tracing::info!("✅ 题目生成完成，共 {} 道", questions.len());
    Ok(questions)
}
