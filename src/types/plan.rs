use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 单个命题项允许的题目数量范围
pub const QUESTION_COUNT_RANGE: (u32, u32) = (1, 3);

/// 命题项难度范围
pub const PLAN_DIFFICULTY_RANGE: (u8, u8) = (3, 5);

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum QuestionType {
    SingleChoice,
    MultipleChoices,
    ShortAnswer,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoices,
        QuestionType::ShortAnswer,
    ];

    /// 题型展示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "单选题",
            QuestionType::MultipleChoices => "多选题",
            QuestionType::ShortAnswer => "简答题",
        }
    }

    /// 题库系统中的题型编码
    pub fn problem_type(&self) -> u8 {
        match self {
            QuestionType::SingleChoice => 1,
            QuestionType::MultipleChoices => 2,
            QuestionType::ShortAnswer => 5,
        }
    }
}

impl Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            QuestionType::SingleChoice => "SingleChoice",
            QuestionType::MultipleChoices => "MultipleChoices",
            QuestionType::ShortAnswer => "ShortAnswer",
        };
        write!(f, "{}", str)
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singlechoice" | "single_choice" | "单选题" | "单选" => Ok(QuestionType::SingleChoice),
            "multiplechoices" | "multiple_choices" | "multiplechoice" | "多选题" | "多选" => {
                Ok(QuestionType::MultipleChoices)
            }
            "shortanswer" | "short_answer" | "简答题" | "简答" => Ok(QuestionType::ShortAnswer),
            _ => Err(format!("Unknown question type: {}", s)),
        }
    }
}

/// 命题蓝图中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamPlanItem {
    /// 合并后的考查单元名称
    #[serde(alias = "merged_label")]
    pub merged_label: String,
    /// 关联的知识点名称，至少一个
    #[serde(alias = "knowledge_points")]
    pub knowledge_points: Vec<String>,
    #[serde(alias = "question_type")]
    pub question_type: QuestionType,
    /// 题目数量，取值1-3
    #[serde(alias = "question_count")]
    pub question_count: u32,
    /// 难度，取值3-5
    pub difficulty: u8,
    /// 命题聚焦点
    #[serde(default)]
    pub focus: String,
    /// 命题理由
    #[serde(default)]
    pub rationale: String,
    /// 期望考查的能力
    #[serde(default, alias = "expected_skills")]
    pub expected_skills: String,
    /// 对作答的期望
    #[serde(default, alias = "answer_expectations")]
    pub answer_expectations: String,
}

impl ExamPlanItem {
    pub fn clamped_count(&self) -> u32 {
        self.question_count
            .clamp(QUESTION_COUNT_RANGE.0, QUESTION_COUNT_RANGE.1)
    }

    pub fn clamped_difficulty(&self) -> u8 {
        self.difficulty
            .clamp(PLAN_DIFFICULTY_RANGE.0, PLAN_DIFFICULTY_RANGE.1)
    }

    /// 去除空白知识点后是否仍可用
    pub fn is_usable(&self) -> bool {
        self.knowledge_points.iter().any(|p| !p.trim().is_empty())
    }

    /// 规范化：剔除空知识点，并将数量与难度收敛到允许区间
    pub fn normalized(mut self) -> Self {
        self.knowledge_points = self
            .knowledge_points
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self.question_count = self.clamped_count();
        self.difficulty = self.clamped_difficulty();
        self
    }
}

/// 命题蓝图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamBlueprint {
    /// 整体命题策略
    #[serde(default)]
    pub strategy: String,
    /// 按顺序排列的命题项
    pub items: Vec<ExamPlanItem>,
}

impl ExamBlueprint {
    /// 解析蓝图JSON，同时接受完整蓝图对象和裸命题项数组
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let blueprint = if value.is_array() {
            ExamBlueprint {
                strategy: String::new(),
                items: serde_json::from_value(value)?,
            }
        } else {
            serde_json::from_value(value)?
        };
        Ok(blueprint.normalized())
    }

    pub fn normalized(self) -> Self {
        let items = self
            .items
            .into_iter()
            .filter(ExamPlanItem::is_usable)
            .map(ExamPlanItem::normalized)
            .collect();
        Self {
            strategy: self.strategy.trim().to_string(),
            items,
        }
    }

    /// 蓝图计划产出的题目总数
    pub fn total_questions(&self) -> u32 {
        self.items.iter().map(ExamPlanItem::clamped_count).sum()
    }
}
