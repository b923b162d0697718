use anyhow::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::agent_executor::{AgentExecuteParams, extract};
use crate::generator::compose::memory::MemoryScope;
use crate::generator::compose::types::{GenerationError, ScatterTask};
use crate::generator::context::GeneratorContext;
use crate::types::plan::{ExamPlanItem, QuestionType};
use crate::types::question::{
    ChoiceQuestion, GeneratedQuestion, QuestionOption, ShortAnswerQuestion,
};

/// 按题型生成单道题目的能力
#[async_trait]
pub trait QuestionDrafter: Send + Sync {
    async fn draft(
        &self,
        question_type: QuestionType,
        plan_item: &ExamPlanItem,
        instructions: &str,
    ) -> Result<GeneratedQuestion>;
}

/// 处理一个分发任务：校验命题项，生成题目，并保证难度不低于命题项要求
pub async fn handle(drafter: &dyn QuestionDrafter, task: &ScatterTask) -> Result<GeneratedQuestion> {
    let order = task.payload.order;
    let plan_item = task
        .payload
        .plan_item
        .as_ref()
        .ok_or(GenerationError::MissingPlanItem {
            order,
            question_type: task.handler,
        })?;

    tracing::info!(
        "   ✏️ 生成第 {} 题 [{}] {}",
        order,
        task.handler.display_name(),
        plan_item.merged_label
    );

    let question = drafter
        .draft(task.handler, plan_item, &task.payload.instructions)
        .await?;

    if question.question_type() != task.handler {
        return Err(GenerationError::TypeMismatch {
            order,
            expected: task.handler,
            actual: question.question_type(),
        }
        .into());
    }

    Ok(question.with_minimum_difficulty(plan_item.clamped_difficulty()))
}

/// 选择题的模型输出结构
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceDraft {
    /// 题干
    pub body: String,
    /// 选项，按A、B、C、D顺序给出
    pub options: Vec<QuestionOption>,
    /// 正确选项标识
    pub answer: Vec<String>,
    /// 难度，1-5
    pub difficulty: u8,
    /// 解析
    pub explanation: String,
}

/// 简答题的模型输出结构
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShortAnswerDraft {
    /// 题干
    pub body: String,
    /// 参考答案
    pub answer: String,
    /// 分点评分要素，每项注明分值
    pub scoring_points: Vec<String>,
    /// 难度，1-5
    pub difficulty: u8,
    /// 解析
    pub explanation: String,
}

const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

impl ChoiceDraft {
    /// 规范化选项标识与答案；单选题只保留一个答案
    fn into_question(self, question_type: QuestionType) -> ChoiceQuestion {
        let options: Vec<QuestionOption> = self
            .options
            .into_iter()
            .zip(OPTION_KEYS)
            .map(|(option, key)| QuestionOption {
                key: key.to_string(),
                content: option.content.trim().to_string(),
            })
            .collect();

        let mut answer: Vec<String> = Vec::new();
        for key in self.answer {
            let key = key.trim().to_uppercase();
            if options.iter().any(|o| o.key == key) && !answer.contains(&key) {
                answer.push(key);
            }
        }
        answer.sort();
        if question_type == QuestionType::SingleChoice {
            answer.truncate(1);
        }

        ChoiceQuestion {
            body: self.body.trim().to_string(),
            options,
            answer,
            difficulty: self.difficulty,
            explanation: self.explanation.trim().to_string(),
        }
    }
}

impl From<ShortAnswerDraft> for ShortAnswerQuestion {
    fn from(draft: ShortAnswerDraft) -> Self {
        Self {
            body: draft.body.trim().to_string(),
            answer: draft.answer.trim().to_string(),
            scoring_points: draft
                .scoring_points
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            difficulty: draft.difficulty,
            explanation: draft.explanation.trim().to_string(),
        }
    }
}

/// 通过模型结构化提取生成题目
pub struct LlmQuestionDrafter {
    context: GeneratorContext,
}

impl LlmQuestionDrafter {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context }
    }

    fn system_prompt(question_type: QuestionType) -> &'static str {
        match question_type {
            QuestionType::SingleChoice => {
                "你是资深的学科命题专家。请根据命题指令编写一道单选题：4个选项，有且只有一个正确答案，干扰项需具有迷惑性且与知识点相关。"
            }
            QuestionType::MultipleChoices => {
                "你是资深的学科命题专家。请根据命题指令编写一道多选题：4个选项，正确答案为2-4个，每个选项都需要学生独立判断。"
            }
            QuestionType::ShortAnswer => {
                "你是资深的学科命题专家。请根据命题指令编写一道简答题，给出参考答案与分点评分要素。"
            }
        }
    }

    fn params(&self, question_type: QuestionType, instructions: &str) -> AgentExecuteParams {
        AgentExecuteParams {
            prompt_sys: Self::system_prompt(question_type).to_string(),
            prompt_user: instructions.to_string(),
            cache_scope: format!("{}/{}", MemoryScope::COMPOSE, question_type),
            log_tag: question_type.display_name().to_string(),
        }
    }
}

#[async_trait]
impl QuestionDrafter for LlmQuestionDrafter {
    async fn draft(
        &self,
        question_type: QuestionType,
        _plan_item: &ExamPlanItem,
        instructions: &str,
    ) -> Result<GeneratedQuestion> {
        let params = self.params(question_type, instructions);
        let question = match question_type {
            QuestionType::SingleChoice => {
                let draft: ChoiceDraft = extract(&self.context, params).await?;
                GeneratedQuestion::SingleChoice(draft.into_question(question_type))
            }
            QuestionType::MultipleChoices => {
                let draft: ChoiceDraft = extract(&self.context, params).await?;
                GeneratedQuestion::MultipleChoices(draft.into_question(question_type))
            }
            QuestionType::ShortAnswer => {
                let draft: ShortAnswerDraft = extract(&self.context, params).await?;
                GeneratedQuestion::ShortAnswer(draft.into())
            }
        };
        Ok(question)
    }
}
