use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::generator::preprocess::memory::{MemoryScope, ScopedKeys};
use crate::generator::preprocess::summarizer::{KnowledgeSummary, summarize};
use crate::generator::{context::GeneratorContext, types::Generator};
use crate::types::student::StudentProfile;

pub mod lookup;
pub mod memory;
pub mod summarizer;

/// 预处理结果
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreprocessingResult {
    pub knowledge_summary: KnowledgeSummary,
    pub student_profile: StudentProfile,
    pub processing_time: f64,
}

#[derive(Default)]
pub struct PreProcessAgent;

/// 执行预处理
pub async fn execute(context: &GeneratorContext) -> Result<PreprocessingResult> {
    PreProcessAgent.execute(context.clone()).await
}

impl PreProcessAgent {
    /// 读取学生画像，未配置时返回空画像
    async fn load_student_profile(&self, context: &GeneratorContext) -> Result<StudentProfile> {
        let Some(path) = &context.config.student_profile_path else {
            return Ok(StudentProfile::default());
        };

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取学生画像文件 {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("学生画像文件格式错误 {}", path.display()))
    }
}

impl Generator<PreprocessingResult> for PreProcessAgent {
    async fn execute(&self, context: GeneratorContext) -> Result<PreprocessingResult> {
        let start_time = Instant::now();
        let config = &context.config;

        tracing::info!("🔍 开始知识体系预处理...");

        let raw = tokio::fs::read_to_string(&config.knowledge_path)
            .await
            .with_context(|| format!("无法读取知识体系文件 {}", config.knowledge_path.display()))?;

        let knowledge_summary = summarize(&raw);
        tracing::info!(
            "   📚 知识点检索键 {} 个",
            knowledge_summary.detail_map.len()
        );

        let student_profile = self.load_student_profile(&context).await?;

        let processing_time = start_time.elapsed().as_secs_f64();
        tracing::info!("✅ 预处理完成，耗时 {:.2}秒", processing_time);

        context
            .store_to_memory(
                MemoryScope::PREPROCESS,
                ScopedKeys::KNOWLEDGE_SUMMARY,
                &knowledge_summary,
            )
            .await?;
        context
            .store_to_memory(
                MemoryScope::PREPROCESS,
                ScopedKeys::STUDENT_PROFILE,
                &student_profile,
            )
            .await?;

        Ok(PreprocessingResult {
            knowledge_summary,
            student_profile,
            processing_time,
        })
    }
}
