use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::plan::QuestionType;

/// 生成题目的难度范围
pub const QUESTION_DIFFICULTY_RANGE: (u8, u8) = (1, 5);

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionOption {
    /// 选项标识，如A、B、C、D
    pub key: String,
    /// 选项内容
    pub content: String,
}

/// 单选题与多选题共用的结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub body: String,
    pub options: Vec<QuestionOption>,
    /// 正确选项标识
    pub answer: Vec<String>,
    pub difficulty: u8,
    pub explanation: String,
}

/// 简答题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortAnswerQuestion {
    pub body: String,
    /// 参考答案
    pub answer: String,
    /// 分点评分要素
    pub scoring_points: Vec<String>,
    pub difficulty: u8,
    pub explanation: String,
}

/// 生成的题目，按题型区分结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum GeneratedQuestion {
    SingleChoice(ChoiceQuestion),
    MultipleChoices(ChoiceQuestion),
    ShortAnswer(ShortAnswerQuestion),
}

impl GeneratedQuestion {
    pub fn question_type(&self) -> QuestionType {
        match self {
            GeneratedQuestion::SingleChoice(_) => QuestionType::SingleChoice,
            GeneratedQuestion::MultipleChoices(_) => QuestionType::MultipleChoices,
            GeneratedQuestion::ShortAnswer(_) => QuestionType::ShortAnswer,
        }
    }

    pub fn difficulty(&self) -> u8 {
        match self {
            GeneratedQuestion::SingleChoice(q) | GeneratedQuestion::MultipleChoices(q) => {
                q.difficulty
            }
            GeneratedQuestion::ShortAnswer(q) => q.difficulty,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            GeneratedQuestion::SingleChoice(q) | GeneratedQuestion::MultipleChoices(q) => &q.body,
            GeneratedQuestion::ShortAnswer(q) => &q.body,
        }
    }

    /// 难度只升不降：取计划难度与生成难度的较大值
    pub fn with_minimum_difficulty(mut self, minimum: u8) -> Self {
        let (lo, hi) = QUESTION_DIFFICULTY_RANGE;
        let clamp_up = |reported: u8| reported.clamp(lo, hi).max(minimum.clamp(lo, hi));
        match &mut self {
            GeneratedQuestion::SingleChoice(q) | GeneratedQuestion::MultipleChoices(q) => {
                q.difficulty = clamp_up(q.difficulty);
            }
            GeneratedQuestion::ShortAnswer(q) => {
                q.difficulty = clamp_up(q.difficulty);
            }
        }
        self
    }

    /// 转换为题库导入用的扁平记录
    pub fn to_record(&self) -> QuestionRecord {
        let question_type = self.question_type();
        let (body, options, answer, remark) = match self {
            GeneratedQuestion::SingleChoice(q) | GeneratedQuestion::MultipleChoices(q) => (
                q.body.clone(),
                Some(q.options.clone()),
                AnswerKey::Keys(q.answer.clone()),
                q.explanation.clone(),
            ),
            GeneratedQuestion::ShortAnswer(q) => {
                let mut remark = q.explanation.clone();
                if !q.scoring_points.is_empty() {
                    if !remark.is_empty() {
                        remark.push('\n');
                    }
                    remark.push_str("评分要点：");
                    remark.push_str(&q.scoring_points.join("；"));
                }
                (q.body.clone(), None, AnswerKey::Text(q.answer.clone()), remark)
            }
        };

        QuestionRecord {
            question_type,
            type_text: question_type.display_name().to_string(),
            problem_type: question_type.problem_type(),
            body,
            options,
            answer,
            difficulty: self.difficulty(),
            remark,
        }
    }
}

/// 答案：选择题为选项标识列表，简答题为参考答案文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Keys(Vec<String>),
    Text(String),
}

/// 题目导出记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "Type")]
    pub question_type: QuestionType,
    #[serde(rename = "TypeText")]
    pub type_text: String,
    #[serde(rename = "ProblemType")]
    pub problem_type: u8,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "Options", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(rename = "Answer")]
    pub answer: AnswerKey,
    pub difficulty: u8,
    #[serde(rename = "Remark")]
    pub remark: String,
}
