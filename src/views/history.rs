use std::fmt::Write;

use chrono::Local;

use crate::history::HistoryEntry;

/// Heading shown when there is no history.
pub const EMPTY_HISTORY: &str = "暂无历史记录";

const EXCERPT_CHARS: usize = 80;

/// Shorten `text` to at most `max` characters on one line.
pub fn excerpt(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let mut cut: String = flat.chars().take(max).collect();
        cut.push('…');
        cut
    }
}

/// One history card.
pub fn render_entry(entry: &HistoryEntry) -> String {
    let when = entry.created_at().with_timezone(&Local);
    let stats = &entry.result.stats;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}  #{}", when.format("%Y-%m-%d"), when.format("%H:%M"), entry.id);
    let _ = writeln!(out, "  “{}”", excerpt(&entry.text, EXCERPT_CHARS));
    let _ = writeln!(out, "  男性: {}  女性: {}", stats.male_count, stats.female_count);
    let _ = writeln!(
        out,
        "  总结: {}",
        excerpt(&entry.result.narrative.summary, EXCERPT_CHARS)
    );
    let _ = writeln!(out, "  查看分析详情 :load {}   删除记录 :delete {}", entry.id, entry.id);
    out
}

/// All entries in the order given (newest first), or the empty state.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return format!(
            "{}\n开始第一次检测后，您的分析结果将自动保存在这里。\n",
            EMPTY_HISTORY
        );
    }

    entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}
