use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::utils::text::{condense, condense_first_line};

/// 节点名称候选字段，按优先级排列
pub const LABEL_KEYS: [&str; 4] = ["name", "title", "label", "id"];

/// 节点描述候选字段，按优先级排列
pub const DESCRIPTION_KEYS: [&str; 7] = [
    "description",
    "desc",
    "summary",
    "content",
    "detail",
    "描述",
    "说明",
];

/// 子节点字段
pub const CHILDREN_KEY: &str = "children";

/// 典型考题字段的命名前缀规则
pub const SAMPLE_QUESTION_KEY_PATTERN: &str =
    r"(?i)^(sample_?questions?|example_?questions?|typical_?questions?|典型考题|例题)";

/// 描述压缩上限
pub const DESCRIPTION_LIMIT: usize = 240;

/// 单条典型考题压缩上限
pub const SAMPLE_QUESTION_LIMIT: usize = 160;

static SAMPLE_QUESTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SAMPLE_QUESTION_KEY_PATTERN).expect("valid sample question pattern"));

/// 知识节点原始记录，字段名不固定，按约定规则提取
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeNode {
    record: Map<String, Value>,
}

impl KnowledgeNode {
    pub fn new(record: Map<String, Value>) -> Self {
        Self { record }
    }

    /// 从JSON值构建节点，纯文本值视为仅有名称的节点，其余非对象值忽略
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::new(map.clone())),
            Value::String(s) => {
                let mut map = Map::new();
                map.insert("name".to_string(), Value::String(s.clone()));
                Some(Self::new(map))
            }
            _ => None,
        }
    }

    /// 按优先级返回第一个非空的候选字段
    pub fn first_present(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.record.get(*key))
            .find_map(scalar_text)
    }

    /// 节点名称，缺失时返回None
    pub fn label(&self) -> Option<String> {
        self.first_present(&LABEL_KEYS)
    }

    /// 节点名称，缺失时按深度生成占位名称
    pub fn label_or_placeholder(&self, depth: usize) -> String {
        self.label()
            .unwrap_or_else(|| format!("未命名节点{}", depth))
    }

    /// 压缩后的描述
    pub fn description(&self) -> Option<String> {
        self.first_present(&DESCRIPTION_KEYS)
            .map(|text| condense(&text, DESCRIPTION_LIMIT))
            .filter(|text| !text.is_empty())
    }

    /// 所有匹配命名规则的典型考题，仅保留首行并压缩
    pub fn sample_questions(&self) -> Vec<String> {
        let mut questions = Vec::new();
        for (key, value) in &self.record {
            if !SAMPLE_QUESTION_KEY.is_match(key) {
                continue;
            }
            match value {
                Value::Array(items) => {
                    questions.extend(items.iter().filter_map(scalar_text));
                }
                other => questions.extend(scalar_text(other)),
            }
        }

        questions
            .iter()
            .map(|q| condense_first_line(q, SAMPLE_QUESTION_LIMIT))
            .filter(|q| !q.is_empty())
            .collect()
    }

    /// 有序子节点
    pub fn children(&self) -> Vec<KnowledgeNode> {
        match self.record.get(CHILDREN_KEY) {
            Some(Value::Array(items)) => items.iter().filter_map(KnowledgeNode::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 末级知识点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedLeaf {
    /// 从根到当前节点的名称序列
    pub path: Vec<String>,
    pub description: Option<String>,
    pub sample_questions: Vec<String>,
}

impl FlattenedLeaf {
    pub fn label(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// 非末级节点摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub path: Vec<String>,
    pub label: String,
    pub child_count: usize,
}
