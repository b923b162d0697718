use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::plan::{ExamPlanItem, QuestionType};

/// 分发给各题型处理器的载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTaskPayload {
    /// 全卷题号，从1开始跨命题项连续递增
    pub order: u32,
    pub plan_item: Option<ExamPlanItem>,
    pub plan_strategy: String,
    /// 完整的命题指令
    pub instructions: String,
}

/// 一道题对应的分发任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterTask {
    /// 目标题型处理器
    pub handler: QuestionType,
    pub payload: QuestionTaskPayload,
}

/// 命题阶段的调用方契约错误
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("第 {order} 题（{question_type}）缺少命题项，无法生成")]
    MissingPlanItem {
        order: u32,
        question_type: QuestionType,
    },
    #[error("第 {order} 题期望题型 {expected}，实际生成 {actual}")]
    TypeMismatch {
        order: u32,
        expected: QuestionType,
        actual: QuestionType,
    },
}
