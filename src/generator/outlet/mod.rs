use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::generator::compose::memory::{
    MemoryScope as ComposeScope, ScopedKeys as ComposeKeys,
};
use crate::generator::compose::types::ScatterTask;
use crate::generator::context::GeneratorContext;
use crate::generator::planning::memory::{
    MemoryScope as PlanningScope, ScopedKeys as PlanningKeys,
};
use crate::generator::preprocess::memory::{
    MemoryScope as PreprocessScope, ScopedKeys as PreprocessKeys,
};
use crate::generator::preprocess::summarizer::KnowledgeSummary;
use crate::types::plan::ExamBlueprint;
use crate::types::question::{GeneratedQuestion, QuestionRecord};

pub mod paper;

/// 输出目录中的文件名
pub struct OutputFiles;

impl OutputFiles {
    pub const KNOWLEDGE_OUTLINE: &'static str = "knowledge_outline.md";
    pub const BLUEPRINT: &'static str = "blueprint.json";
    pub const SCATTER_TASKS: &'static str = "scatter_tasks.json";
    pub const QUESTIONS_JSON: &'static str = "questions.json";
    pub const QUESTIONS_MARKDOWN: &'static str = "questions.md";
}

/// 保存本次运行的全部产出
pub async fn save(context: &GeneratorContext) -> Result<()> {
    DiskOutlet.save(context).await
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, context: &GeneratorContext) -> Result<()>;
}

/// 将记忆中的各阶段结果写入输出目录
pub struct DiskOutlet;

impl DiskOutlet {
    async fn write_text(dir: &Path, file_name: &str, content: &str) -> Result<()> {
        let path = dir.join(file_name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入 {}", path.display()))?;
        tracing::info!("💾 已保存: {}", path.display());
        Ok(())
    }

    async fn write_json<T: Serialize>(dir: &Path, file_name: &str, data: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        Self::write_text(dir, file_name, &content).await
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, context: &GeneratorContext) -> Result<()> {
        tracing::info!("🖊️ 保存输出结果...");
        let output_dir = &context.config.output_path;
        if output_dir.exists() {
            tokio::fs::remove_dir_all(output_dir)
                .await
                .with_context(|| format!("无法清理输出目录 {}", output_dir.display()))?;
        }
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("无法创建输出目录 {}", output_dir.display()))?;

        let course_name = context.config.get_course_name();

        match context
            .get_from_memory::<KnowledgeSummary>(
                PreprocessScope::PREPROCESS,
                PreprocessKeys::KNOWLEDGE_SUMMARY,
            )
            .await
        {
            Some(summary) => {
                let outline = paper::render_knowledge_outline(&course_name, &summary);
                Self::write_text(output_dir, OutputFiles::KNOWLEDGE_OUTLINE, &outline).await?;
            }
            None => tracing::warn!("⚠️ 未找到知识体系摘要，跳过概览输出"),
        }

        if let Some(blueprint) = context
            .get_from_memory::<ExamBlueprint>(PlanningScope::PLANNING, PlanningKeys::BLUEPRINT)
            .await
        {
            Self::write_json(output_dir, OutputFiles::BLUEPRINT, &blueprint).await?;
        }

        if let Some(tasks) = context
            .get_from_memory::<Vec<ScatterTask>>(ComposeScope::COMPOSE, ComposeKeys::TASKS)
            .await
        {
            Self::write_json(output_dir, OutputFiles::SCATTER_TASKS, &tasks).await?;
        }

        match context
            .get_from_memory::<Vec<GeneratedQuestion>>(ComposeScope::COMPOSE, ComposeKeys::QUESTIONS)
            .await
        {
            Some(questions) => {
                let records: Vec<QuestionRecord> =
                    questions.iter().map(GeneratedQuestion::to_record).collect();
                Self::write_json(output_dir, OutputFiles::QUESTIONS_JSON, &records).await?;
                let doc = paper::render_paper(&course_name, &questions);
                Self::write_text(output_dir, OutputFiles::QUESTIONS_MARKDOWN, &doc).await?;
            }
            None => tracing::info!("⏭️ 本次未生成题目，跳过试卷输出"),
        }

        tracing::info!("💾 输出完成，目录: {}", output_dir.display());
        Ok(())
    }
}
