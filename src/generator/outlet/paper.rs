//! 试卷与知识概览的 Markdown 渲染

use crate::generator::preprocess::summarizer::KnowledgeSummary;
use crate::types::question::{AnswerKey, GeneratedQuestion};

/// 知识体系概览文档
pub fn render_knowledge_outline(course_name: &str, summary: &KnowledgeSummary) -> String {
    format!(
        "# {} 知识体系概览\n\n{}\n\n## 末级知识点要点\n\n{}\n",
        course_name, summary.outline, summary.leaf_highlights
    )
}

/// 试卷文档：题目、选项、答案与解析
pub fn render_paper(course_name: &str, questions: &[GeneratedQuestion]) -> String {
    let mut doc = format!("# {} 试卷\n\n共 {} 道题\n", course_name, questions.len());

    for (i, question) in questions.iter().enumerate() {
        let record = question.to_record();
        doc.push_str(&format!(
            "\n## {}. {}（难度 {}）\n\n{}\n",
            i + 1,
            record.type_text,
            record.difficulty,
            record.body
        ));

        if let Some(options) = &record.options {
            doc.push('\n');
            for option in options {
                doc.push_str(&format!("- {}. {}\n", option.key, option.content));
            }
        }

        let answer = match &record.answer {
            AnswerKey::Keys(keys) => keys.join(""),
            AnswerKey::Text(text) => text.clone(),
        };
        doc.push_str(&format!("\n**答案**：{}\n", answer));
        if !record.remark.is_empty() {
            doc.push_str(&format!("\n**解析**：{}\n", record.remark));
        }
    }

    doc
}
