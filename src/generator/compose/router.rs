//! 命题路由：按蓝图顺序为每一道题生成分发任务与命题指令

use crate::generator::compose::types::{QuestionTaskPayload, ScatterTask};
use crate::generator::preprocess::lookup::DetailLookup;
use crate::types::plan::{ExamPlanItem, QuestionType};
use crate::utils::text::truncate_chars;

/// 每个命题项最多引用的知识点详情数
pub const MAX_CONTEXT_DETAILS: usize = 8;

/// 命题指令中知识点精要的字符上限
pub const CONTEXT_CHAR_LIMIT: usize = 2000;

/// 蓝图未给出策略时使用的默认策略
pub const DEFAULT_PLAN_STRATEGY: &str =
    "围绕核心知识点均衡命题，兼顾基础理解与综合应用，难度循序渐进";

/// 路由时各命题项共享的输入
#[derive(Debug, Clone, Copy)]
pub struct RoutingInputs<'a> {
    pub course_name: &'a str,
    pub student_profile: &'a str,
    /// 全局知识摘要，知识点全部未命中时原样使用
    pub knowledge_digest: &'a str,
    pub plan_strategy: &'a str,
}

/// 展开蓝图：每个命题项按数量拆成若干任务，题号全卷连续
pub fn route(
    plan: &[ExamPlanItem],
    lookup: &DetailLookup,
    inputs: RoutingInputs<'_>,
) -> Vec<ScatterTask> {
    let (tasks, _) = plan.iter().fold(
        (Vec::new(), 1u32),
        |(mut tasks, next_order), item| {
            let context = knowledge_context(item, lookup, inputs.knowledge_digest);
            let count = item.clamped_count();

            for order in next_order..next_order + count {
                tasks.push(ScatterTask {
                    handler: item.question_type,
                    payload: QuestionTaskPayload {
                        order,
                        plan_item: Some(item.clone()),
                        plan_strategy: inputs.plan_strategy.to_string(),
                        instructions: build_instruction(item, order, &context, &inputs),
                    },
                });
            }
            (tasks, next_order + count)
        },
    );

    tracing::debug!("命题路由完成：{} 个命题项，{} 个任务", plan.len(), tasks.len());
    tasks
}

/// 命题项的知识点精要：按知识点顺序取前若干条不重复的详情，全部未命中时使用全局摘要
pub fn knowledge_context(item: &ExamPlanItem, lookup: &DetailLookup, digest: &str) -> String {
    let mut details: Vec<&str> = Vec::new();
    for point in &item.knowledge_points {
        if details.len() >= MAX_CONTEXT_DETAILS {
            break;
        }
        if let Some(detail) = lookup.lookup(point) {
            if !details.contains(&detail) {
                details.push(detail);
            }
        }
    }

    if details.is_empty() {
        tracing::debug!("命题项[{}]的知识点均未命中，使用全局摘要", item.merged_label);
        return digest.to_string();
    }
    details.join("\n")
}

fn or_none(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() { "无" } else { trimmed }
}

fn difficulty_directive(difficulty: u8) -> &'static str {
    match difficulty {
        0..=3 => "在扎实考查基础的同时设置一定的思维坡度",
        4 => "需要多步推理或知识迁移，避免直接套用结论",
        _ => "需要综合多个知识点解决陌生情境问题，具有明显区分度",
    }
}

/// 组装单道题的命题指令
pub fn build_instruction(
    item: &ExamPlanItem,
    order: u32,
    context: &str,
    inputs: &RoutingInputs<'_>,
) -> String {
    let strategy = match inputs.plan_strategy.trim() {
        "" => DEFAULT_PLAN_STRATEGY,
        s => s,
    };
    let difficulty = item.clamped_difficulty();

    let mut lines = vec![
        format!("课程：{}", inputs.course_name),
        format!("学生画像：{}", inputs.student_profile),
        format!("命题策略：{}", strategy),
        format!("考查单元：{}", item.merged_label),
        format!("知识点：{}", item.knowledge_points.join("、")),
        format!("能力要求：{}", or_none(&item.expected_skills)),
        format!("题型：{}（第 {} 题）", item.question_type.display_name(), order),
        format!(
            "难度：{}（满分5），{}",
            difficulty,
            difficulty_directive(difficulty)
        ),
        format!("命题聚焦：{}", or_none(&item.focus)),
        format!("答题要求：{}", or_none(&item.answer_expectations)),
        format!("命题理由：{}", or_none(&item.rationale)),
        format!(
            "关联知识点精要：\n{}",
            truncate_chars(context, CONTEXT_CHAR_LIMIT)
        ),
        "请设计考查高阶思维的题目，注重分析、综合与评价能力，避免单纯记忆性考查。".to_string(),
    ];

    if item.question_type == QuestionType::ShortAnswer {
        lines.push(
            "简答题须给出参考答案，并列出分点评分要素，每个要素注明分值。".to_string(),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::preprocess::summarizer::summarize;

    fn plan_item(points: &[&str], question_type: QuestionType, count: u32) -> ExamPlanItem {
        ExamPlanItem {
            merged_label: "X".to_string(),
            knowledge_points: points.iter().map(|p| p.to_string()).collect(),
            question_type,
            question_count: count,
            difficulty: 4,
            focus: "概念辨析".to_string(),
            rationale: String::new(),
            expected_skills: String::new(),
            answer_expectations: String::new(),
        }
    }

    fn inputs<'a>(digest: &'a str) -> RoutingInputs<'a> {
        RoutingInputs {
            course_name: "测试课程",
            student_profile: "基础一般",
            knowledge_digest: digest,
            plan_strategy: "",
        }
    }

    #[test]
    fn test_single_item_two_tasks() {
        let summary = summarize(r#"{"name":"A","children":[{"name":"B"},{"name":"C"}]}"#);
        let plan = vec![plan_item(&["B"], QuestionType::SingleChoice, 2)];

        let tasks = route(&plan, &summary.detail_map, inputs("摘要"));

        assert_eq!(tasks.len(), 2);
        let detail = summary.detail_map.get("B").unwrap();
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.handler, QuestionType::SingleChoice);
            assert_eq!(task.payload.order, i as u32 + 1);
            assert!(
                task.payload
                    .instructions
                    .contains(&format!("关联知识点精要：\n{}", detail))
            );
        }
    }

    #[test]
    fn test_orders_continue_across_items() {
        let summary = summarize(r#"{"name":"A","children":[{"name":"B"},{"name":"C"}]}"#);
        let plan = vec![
            plan_item(&["B"], QuestionType::SingleChoice, 7),
            plan_item(&["C"], QuestionType::ShortAnswer, 0),
            plan_item(&["B", "C"], QuestionType::MultipleChoices, 2),
        ];

        let tasks = route(&plan, &summary.detail_map, inputs("摘要"));
        let orders: Vec<u32> = tasks.iter().map(|t| t.payload.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(tasks[3].handler, QuestionType::ShortAnswer);
        assert!(tasks[3].payload.instructions.contains("（第 4 题）"));
    }

    #[test]
    fn test_unmatched_points_use_digest() {
        let summary = summarize(r#"{"name":"A","children":[{"name":"B"}]}"#);
        let plan = vec![plan_item(&["完全无关"], QuestionType::SingleChoice, 1)];

        let tasks = route(&plan, &summary.detail_map, inputs("全局摘要原文"));
        assert!(
            tasks[0]
                .payload
                .instructions
                .contains("关联知识点精要：\n全局摘要原文")
        );
    }

    #[test]
    fn test_context_keeps_first_distinct_details() {
        let children: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"name":"点{}"}}"#, i))
            .collect();
        let raw = format!(r#"{{"name":"根","children":[{}]}}"#, children.join(","));
        let summary = summarize(&raw);

        let mut points = vec!["点0", "根 > 点0"];
        let names: Vec<String> = (1..12).map(|i| format!("点{}", i)).collect();
        points.extend(names.iter().map(String::as_str));
        let item = plan_item(&points, QuestionType::SingleChoice, 1);

        let context = knowledge_context(&item, &summary.detail_map, "摘要");
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines.len(), MAX_CONTEXT_DETAILS);
        assert_eq!(lines[0], "根 > 点0");
        assert_eq!(lines[1], "根 > 点1");
        assert_eq!(lines[7], "根 > 点7");
    }

    #[test]
    fn test_long_context_truncated() {
        let item = plan_item(&["B"], QuestionType::SingleChoice, 1);
        let context = "知".repeat(CONTEXT_CHAR_LIMIT + 10);
        let instruction = build_instruction(&item, 1, &context, &inputs(""));

        let expected = format!("{}…", "知".repeat(CONTEXT_CHAR_LIMIT));
        assert!(instruction.contains(&expected));
        assert!(!instruction.contains(&"知".repeat(CONTEXT_CHAR_LIMIT + 1)));
    }

    #[test]
    fn test_instruction_fields() {
        let item = plan_item(&["B", "C"], QuestionType::ShortAnswer, 1);
        let instruction = build_instruction(&item, 3, "详情", &inputs(""));

        assert!(instruction.contains("课程：测试课程"));
        assert!(instruction.contains(&format!("命题策略：{}", DEFAULT_PLAN_STRATEGY)));
        assert!(instruction.contains("知识点：B、C"));
        assert!(instruction.contains("简答题（第 3 题）"));
        assert!(instruction.contains("难度：4"));
        assert!(instruction.contains("命题聚焦：概念辨析"));
        assert!(instruction.contains("评分要素"));

        let choice = plan_item(&["B"], QuestionType::SingleChoice, 1);
        assert!(!build_instruction(&choice, 1, "详情", &inputs("")).contains("评分要素"));
    }

    #[test]
    fn test_empty_plan_routes_nothing() {
        assert!(route(&[], &DetailLookup::new(), inputs("摘要")).is_empty());
    }
}
