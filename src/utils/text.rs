//! 文本压缩原语，供提示词构建时控制上下文长度

/// 截断标记
pub const ELLIPSIS: char = '…';

/// 将所有连续空白折叠为单个空格并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 移除全部空白字符，用于名称的宽松匹配
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 折叠空白后按字符数截断，超长时以省略号结尾，结果长度不超过`limit`
pub fn condense(text: &str, limit: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= limit {
        return collapsed;
    }
    if limit == 0 {
        return String::new();
    }

    let mut truncated: String = collapsed.chars().take(limit - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// 取首个非空行后再压缩
pub fn condense_first_line(text: &str, limit: usize) -> String {
    let first_line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    condense(first_line, limit)
}

/// 保留原始空白的截断，仅在超长时追加省略号（前`limit`个字符 + 省略号）
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push(ELLIPSIS);
    truncated
}
