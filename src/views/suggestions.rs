use std::fmt::Write;

use crate::analysis::AnalysisResult;

/// Rewrite tips as a numbered list, reflection questions quoted.
pub fn render_suggestions(result: &AnalysisResult) -> String {
    let suggestions = &result.suggestions;
    let mut out = String::new();

    let _ = writeln!(out, "== 改进文本建议 (Rewrite Suggestions) ==");
    for (i, tip) in suggestions.rewrite_tips.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, tip);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "== 引导性思考问题 (Reflection Questions) ==");
    let _ = writeln!(out, "使用这些问题来指导讨论或自我反思：");
    for question in &suggestions.reflection_questions {
        let _ = writeln!(out, "  “{}”", question);
    }

    out
}
