use anyhow::{Context, Result, anyhow};

use crate::generator::agent_executor::{AgentExecuteParams, extract};
use crate::generator::context::GeneratorContext;
use crate::generator::planning::memory::MemoryScope;
use crate::generator::preprocess::summarizer::KnowledgeSummary;
use crate::types::plan::{ExamBlueprint, QuestionType};
use crate::types::student::StudentProfile;

const SYSTEM_PROMPT: &str = "你是资深的学科命题专家，擅长依据知识体系与学生画像设计结构合理、难度梯度清晰的试卷蓝图。请严格按照给定的结构输出。";

/// 命题蓝图规划器
#[derive(Default)]
pub struct BlueprintPlanner;

impl BlueprintPlanner {
    pub fn agent_type(&self) -> &'static str {
        "BlueprintPlanner"
    }

    /// 生成蓝图：配置了蓝图文件时直接读取，否则调用模型规划
    pub async fn plan(
        &self,
        context: &GeneratorContext,
        summary: &KnowledgeSummary,
        profile: &StudentProfile,
    ) -> Result<ExamBlueprint> {
        let mut blueprint = match &context.config.plan_path {
            Some(path) => {
                tracing::info!("📄 从文件加载命题蓝图: {}", path.display());
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("无法读取命题蓝图文件 {}", path.display()))?;
                ExamBlueprint::from_json(&content)
                    .with_context(|| format!("命题蓝图文件格式错误 {}", path.display()))?
            }
            None => {
                let params = AgentExecuteParams {
                    prompt_sys: SYSTEM_PROMPT.to_string(),
                    prompt_user: self.build_user_prompt(context, summary, profile),
                    cache_scope: format!("{}/{}", MemoryScope::PLANNING, self.agent_type()),
                    log_tag: "命题蓝图规划".to_string(),
                };
                tracing::info!("🤖 正在规划命题蓝图...");
                let blueprint: ExamBlueprint = extract(context, params).await?;
                blueprint.normalized()
            }
        };

        let configured_strategy = context.config.plan_strategy.trim();
        if !configured_strategy.is_empty() {
            blueprint.strategy = configured_strategy.to_string();
        }

        if blueprint.items.is_empty() {
            return Err(anyhow!("命题蓝图为空，没有可用的命题项"));
        }

        tracing::info!(
            "✅ 命题蓝图就绪：{} 个命题项，计划 {} 道题",
            blueprint.items.len(),
            blueprint.total_questions()
        );
        Ok(blueprint)
    }

    fn build_user_prompt(
        &self,
        context: &GeneratorContext,
        summary: &KnowledgeSummary,
        profile: &StudentProfile,
    ) -> String {
        let config = &context.config;
        let type_names = QuestionType::ALL
            .iter()
            .map(|t| format!("{}（{}）", t, t.display_name()))
            .collect::<Vec<_>>()
            .join("、");

        format!(
            "## 命题任务\n为课程《{}》规划一份约 {} 道题的试卷蓝图。\n\n\
             ### 学生画像\n{}\n\n\
             ### 知识体系概览\n{}\n\n\
             ### 末级知识点要点\n{}\n\n\
             ### 规划要求\n\
             1. 将关联紧密的知识点合并为一个命题项，mergedLabel 为合并后的考查单元名称；\n\
             2. knowledgePoints 必须使用上面出现过的知识点名称，至少一个；\n\
             3. questionType 只能取 {}；\n\
             4. questionCount 取 1-3，difficulty 取 3-5；\n\
             5. 针对学生薄弱环节适当增加题量，并在 rationale 中说明理由；\n\
             6. strategy 概括整体命题思路。\n",
            config.get_course_name(),
            config.target_question_count,
            profile.summary(),
            summary.outline,
            summary.leaf_highlights,
            type_names
        )
    }
}
