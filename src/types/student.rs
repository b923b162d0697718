use serde::{Deserialize, Serialize};

/// 学生画像
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub grade: String,
    /// 整体学习水平描述
    pub level: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// 其他补充说明
    pub notes: String,
}

impl StudentProfile {
    /// 用于提示词的一段式画像摘要
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.name.trim().is_empty() {
            parts.push(format!("学生：{}", self.name.trim()));
        }
        if !self.grade.trim().is_empty() {
            parts.push(format!("年级：{}", self.grade.trim()));
        }
        if !self.level.trim().is_empty() {
            parts.push(format!("整体水平：{}", self.level.trim()));
        }
        if !self.strengths.is_empty() {
            parts.push(format!("优势：{}", self.strengths.join("、")));
        }
        if !self.weaknesses.is_empty() {
            parts.push(format!("薄弱环节：{}", self.weaknesses.join("、")));
        }
        if !self.notes.trim().is_empty() {
            parts.push(self.notes.trim().to_string());
        }

        if parts.is_empty() {
            "暂无学生画像信息，按课程标准的中等偏上水平命题".to_string()
        } else {
            parts.join("；")
        }
    }
}
