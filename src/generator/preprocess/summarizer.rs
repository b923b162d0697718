//! 知识体系摘要：将任意层级的知识树压缩为有界的概览、要点摘录和知识点详情映射

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::preprocess::lookup::DetailLookup;
use crate::types::knowledge::{BranchSummary, FlattenedLeaf, KnowledgeNode};
use crate::utils::text::condense;

/// 要点摘录与详情映射覆盖的末级知识点数量上限
pub const MAX_HIGHLIGHT_LEAVES: usize = 60;

/// 概览中每个二级分支列出的示例知识点数量
pub const MAX_BRANCH_EXAMPLES: usize = 3;

/// 无法解析为JSON时原文的压缩上限
pub const FALLBACK_TEXT_LIMIT: usize = 1800;

/// 路径分隔符
pub const PATH_SEPARATOR: &str = " > ";

/// 知识体系摘要结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSummary {
    /// 二级分支概览
    pub outline: String,
    /// 末级知识点要点摘录
    pub leaf_highlights: String,
    /// 知识点名称变体到详情的映射
    pub detail_map: DetailLookup,
    /// 压缩后的原文
    pub condensed_raw: String,
}

impl KnowledgeSummary {
    /// 全局知识摘要：概览 + 末级知识点要点，两者相同时只保留一份
    pub fn digest(&self) -> String {
        if self.outline == self.leaf_highlights || self.leaf_highlights.is_empty() {
            return self.outline.clone();
        }
        if self.outline.is_empty() {
            return self.leaf_highlights.clone();
        }
        format!("{}\n\n{}", self.outline, self.leaf_highlights)
    }
}

/// 一次遍历得到的扁平化知识树
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedTree {
    pub leaves: Vec<FlattenedLeaf>,
    pub branches: Vec<BranchSummary>,
}

/// 生成知识体系摘要，输入不是合法JSON时退化为纯文本摘要
pub fn summarize(raw: &str) -> KnowledgeSummary {
    if raw.trim().is_empty() {
        return KnowledgeSummary::default();
    }

    let condensed_raw = condense(raw, FALLBACK_TEXT_LIMIT);

    let roots: Vec<KnowledgeNode> = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().filter_map(KnowledgeNode::from_value).collect(),
        Ok(value @ Value::Object(_)) => KnowledgeNode::from_value(&value).into_iter().collect(),
        Ok(_) | Err(_) => {
            tracing::debug!("知识体系不是JSON树，按纯文本处理");
            return text_fallback(condensed_raw);
        }
    };

    let tree = flatten(&roots);
    let outline = build_outline(&tree);
    let leaf_highlights = build_leaf_highlights(&tree, &condensed_raw);
    let detail_map = build_detail_map(&tree);

    tracing::debug!(
        "知识体系摘要完成：{} 个末级知识点，{} 个分支，{} 个检索键",
        tree.leaves.len(),
        tree.branches.len(),
        detail_map.len()
    );

    KnowledgeSummary {
        outline,
        leaf_highlights,
        detail_map,
        condensed_raw,
    }
}

fn text_fallback(condensed_raw: String) -> KnowledgeSummary {
    KnowledgeSummary {
        outline: condensed_raw.clone(),
        leaf_highlights: condensed_raw.clone(),
        detail_map: DetailLookup::new(),
        condensed_raw,
    }
}

/// 深度优先先序遍历，分别收集末级知识点与分支
pub fn flatten(roots: &[KnowledgeNode]) -> FlattenedTree {
    let mut tree = FlattenedTree::default();
    for root in roots {
        visit(root, &[], 1, &mut tree);
    }
    tree
}

fn visit(node: &KnowledgeNode, parent_path: &[String], depth: usize, tree: &mut FlattenedTree) {
    let label = node.label_or_placeholder(depth);
    let mut path = parent_path.to_vec();
    path.push(label.clone());

    let children = node.children();
    if children.is_empty() {
        tree.leaves.push(FlattenedLeaf {
            path,
            description: node.description(),
            sample_questions: node.sample_questions(),
        });
        return;
    }

    tree.branches.push(BranchSummary {
        path: path.clone(),
        label,
        child_count: children.len(),
    });
    for child in &children {
        visit(child, &path, depth + 1, tree);
    }
}

fn join_path(path: &[String]) -> String {
    path.join(PATH_SEPARATOR)
}

/// 末级知识点的详情描述：路径、描述、首个典型考题
pub fn leaf_detail(leaf: &FlattenedLeaf) -> String {
    let mut detail = join_path(&leaf.path);
    if let Some(description) = &leaf.description {
        detail.push_str(&format!(" | 描述：{}", description));
    }
    if let Some(question) = leaf.sample_questions.first() {
        detail.push_str(&format!(" | 典型考题：{}", question));
    }
    detail
}

fn branch_detail(branch: &BranchSummary) -> String {
    format!("{}（子节点 {} 个）", join_path(&branch.path), branch.child_count)
}

/// 概览：总数标题 + 每个二级分支一行
pub fn build_outline(tree: &FlattenedTree) -> String {
    let mut lines = vec![format!(
        "知识体系概览：共计 {} 个末级知识点",
        tree.leaves.len()
    )];

    let second_level = tree.branches.iter().filter(|b| b.path.len() == 2);
    for (i, branch) in second_level.enumerate() {
        let under_branch: Vec<&FlattenedLeaf> = tree
            .leaves
            .iter()
            .filter(|leaf| leaf.path.starts_with(&branch.path))
            .collect();
        let examples: Vec<&str> = under_branch
            .iter()
            .take(MAX_BRANCH_EXAMPLES)
            .map(|leaf| leaf.label())
            .collect();

        let mut line = format!(
            "{}. {}（末级知识点 {} 个",
            i + 1,
            join_path(&branch.path),
            under_branch.len()
        );
        if !examples.is_empty() {
            line.push_str(&format!("，示例：{}", examples.join("、")));
        }
        line.push('）');
        lines.push(line);
    }

    lines.join("\n")
}

/// 要点摘录：前若干个末级知识点逐行列出，没有末级知识点时使用原文
pub fn build_leaf_highlights(tree: &FlattenedTree, condensed_raw: &str) -> String {
    if tree.leaves.is_empty() {
        return format!("知识点原文：{}", condensed_raw);
    }

    tree.leaves
        .iter()
        .take(MAX_HIGHLIGHT_LEAVES)
        .enumerate()
        .map(|(i, leaf)| format!("{}. {}", i + 1, leaf_detail(leaf)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 知识点详情映射，先登记末级知识点，再登记全部分支
pub fn build_detail_map(tree: &FlattenedTree) -> DetailLookup {
    let mut lookup = DetailLookup::new();

    for leaf in tree.leaves.iter().take(MAX_HIGHLIGHT_LEAVES) {
        let detail = leaf_detail(leaf);
        let tail_start = leaf.path.len().saturating_sub(2);

        lookup.insert_with_normalized(leaf.label(), &detail);
        lookup.insert_with_normalized(&join_path(&leaf.path), &detail);
        lookup.insert_with_normalized(&join_path(&leaf.path[tail_start..]), &detail);
    }

    for branch in &tree.branches {
        lookup.insert_with_normalized(&join_path(&branch.path), &branch_detail(branch));
    }

    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIMPLE_TREE: &str = r#"{"name":"A","children":[{"name":"B"},{"name":"C"}]}"#;

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize("   "), KnowledgeSummary::default());
    }

    #[test]
    fn test_simple_tree() {
        let summary = summarize(SIMPLE_TREE);
        assert!(summary.outline.contains("共计 2 个末级知识点"));
        assert!(summary.detail_map.get("B").unwrap().contains("A > B"));
        assert!(summary.detail_map.get("C").unwrap().contains("A > C"));
        assert_eq!(summary.detail_map.get("A"), Some("A（子节点 2 个）"));
        assert_eq!(summary.leaf_highlights, "1. A > B\n2. A > C");
    }

    #[test]
    fn test_malformed_input_falls_back_to_text() {
        let raw = format!("not json {}", "x ".repeat(2000));
        let summary = summarize(&raw);
        assert_eq!(summary.outline, summary.leaf_highlights);
        assert!(summary.outline.chars().count() <= FALLBACK_TEXT_LIMIT);
        assert!(summary.outline.ends_with('…'));
        assert!(summary.detail_map.is_empty());
    }

    #[test]
    fn test_short_malformed_input_is_kept() {
        let summary = summarize("力学  基础");
        assert_eq!(summary.outline, "力学 基础");
        assert_eq!(summary.leaf_highlights, "力学 基础");
    }

    #[test]
    fn test_scalar_json_is_treated_as_text() {
        let summary = summarize("42");
        assert_eq!(summary.outline, "42");
        assert!(summary.detail_map.is_empty());
    }

    #[test]
    fn test_outline_lists_second_level_branches() {
        let raw = json!([{
            "name": "物理",
            "children": [
                {"name": "力学", "children": [
                    {"name": "牛顿第一定律"},
                    {"name": "牛顿第二定律"},
                    {"name": "牛顿第三定律"},
                    {"name": "动量守恒"}
                ]},
                {"name": "电学", "children": [
                    {"name": "欧姆定律"},
                    {"name": "深层", "children": [{"name": "电磁感应"}]}
                ]}
            ]
        }])
        .to_string();

        let summary = summarize(&raw);
        let lines: Vec<&str> = summary.outline.lines().collect();
        assert_eq!(lines[0], "知识体系概览：共计 6 个末级知识点");
        assert_eq!(
            lines[1],
            "1. 物理 > 力学（末级知识点 4 个，示例：牛顿第一定律、牛顿第二定律、牛顿第三定律）"
        );
        assert_eq!(lines[2], "2. 物理 > 电学（末级知识点 2 个，示例：欧姆定律、电磁感应）");
        // 三级分支不进入概览
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_detail_map_variants() {
        let raw = json!({
            "name": "化学",
            "children": [{
                "name": "有机 化学",
                "children": [{
                    "name": "烷烃",
                    "description": "饱和  链烃",
                    "sample_question": "甲烷的空间构型是？\n附图"
                }]
            }]
        })
        .to_string();

        let summary = summarize(&raw);
        let expected = "化学 > 有机 化学 > 烷烃 | 描述：饱和 链烃 | 典型考题：甲烷的空间构型是？";
        let map = &summary.detail_map;
        assert_eq!(map.get("烷烃"), Some(expected));
        assert_eq!(map.get("化学 > 有机 化学 > 烷烃"), Some(expected));
        assert_eq!(map.get("有机 化学 > 烷烃"), Some(expected));
        assert_eq!(map.get("化学>有机化学>烷烃"), Some(expected));
        assert_eq!(map.get("有机化学>烷烃"), Some(expected));
        assert_eq!(map.get("化学 > 有机 化学"), Some("化学 > 有机 化学（子节点 1 个）"));
        assert_eq!(map.get("化学>有机化学"), Some("化学 > 有机 化学（子节点 1 个）"));
    }

    #[test]
    fn test_first_occurrence_wins_on_collision() {
        let raw = json!([
            {"name": "甲", "children": [{"name": "同名", "desc": "第一"}]},
            {"name": "乙", "children": [{"name": "同名", "desc": "第二"}]}
        ])
        .to_string();

        let summary = summarize(&raw);
        assert!(summary.detail_map.get("同名").unwrap().contains("第一"));
        assert!(summary.detail_map.get("乙 > 同名").unwrap().contains("第二"));
    }

    #[test]
    fn test_leaf_caps() {
        let children: Vec<_> = (0..80).map(|i| json!({"name": format!("点{}", i)})).collect();
        let raw = json!({"name": "根", "children": children}).to_string();

        let summary = summarize(&raw);
        assert_eq!(summary.leaf_highlights.lines().count(), MAX_HIGHLIGHT_LEAVES);
        assert!(summary.detail_map.get("点59").is_some());
        assert!(summary.detail_map.get("点60").is_none());
        assert!(summary.outline.contains("共计 80 个末级知识点"));
    }

    #[test]
    fn test_unnamed_nodes_get_placeholder() {
        let raw = json!({"children": [{"desc": "无名"}]}).to_string();
        let tree = flatten(&[KnowledgeNode::from_value(&serde_json::from_str(&raw).unwrap()).unwrap()]);
        assert_eq!(tree.branches[0].label, "未命名节点1");
        assert_eq!(tree.leaves[0].path, vec!["未命名节点1", "未命名节点2"]);
    }

    #[test]
    fn test_no_leaves_highlights_use_raw() {
        let summary = summarize("[]");
        assert_eq!(summary.leaf_highlights, "知识点原文：[]");
        assert_eq!(summary.outline, "知识体系概览：共计 0 个末级知识点");
    }

    #[test]
    fn test_digest_joins_outline_and_highlights() {
        let summary = summarize(r#"{"name":"A","children":[{"name":"B"}]}"#);
        let digest = summary.digest();
        assert!(digest.starts_with("知识体系概览"));
        assert!(digest.contains("1. A > B"));

        let text = summarize("纯文本  知识");
        assert_eq!(text.digest(), "纯文本 知识");
    }

    #[test]
    fn test_leaf_detail_uses_first_sample_in_document_order() {
        let raw = r#"{"name":"R","children":[{"name":"L","典型考题":"文档中第一个","example_question":"文档中第二个"}]}"#;
        let summary = summarize(raw);
        assert_eq!(
            summary.detail_map.get("L"),
            Some("R > L | 典型考题：文档中第一个")
        );
    }
}
