use std::fmt::Write;

use super::chart::render_gender_ratio;
use crate::analysis::{AnalysisResult, GenderStatistics};

/// Placeholder for an empty role list.
pub const NO_ROLES: &str = "未检测到";

/// Headline under the ratio chart, e.g. `1 男性 | 1 女性`.
pub fn gender_headline(stats: &GenderStatistics) -> String {
    format!("{} 男性 | {} 女性", stats.male_count, stats.female_count)
}

/// Role titles as chips, or the placeholder when there are none.
pub fn render_roles(roles: &[String]) -> String {
    if roles.is_empty() {
        return NO_ROLES.to_string();
    }
    roles
        .iter()
        .map(|r| format!("[{}]", r))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full analysis report: surface statistics then narrative analysis.
pub fn render_report(result: &AnalysisResult) -> String {
    let stats = &result.stats;
    let narrative = &result.narrative;
    let mut out = String::new();

    let _ = writeln!(out, "== 表层性别表征 (Surface Level) ==");
    let _ = writeln!(out);
    let _ = writeln!(out, "性别比例 (Gender Ratio)");
    out.push_str(&render_gender_ratio(stats));
    let _ = writeln!(out, "{}", gender_headline(stats));
    let _ = writeln!(out);
    let _ = writeln!(out, "职业角色分布 (Professional Roles)");
    let _ = writeln!(out, "  男性角色: {}", render_roles(&stats.male_roles));
    let _ = writeln!(out, "  女性角色: {}", render_roles(&stats.female_roles));
    let _ = writeln!(out);

    let _ = writeln!(out, "== 深层叙事分析 (Deep Narrative Analysis) ==");
    for (title, body) in [
        ("人物特质（形容词分析）", &narrative.adjective_analysis),
        ("社会角色或行为角色（行为模式/公共VS私人）", &narrative.social_roles),
        ("叙事逻辑与权力结构", &narrative.power_dynamics),
    ] {
        let _ = writeln!(out);
        let _ = writeln!(out, "# {}", title);
        let _ = writeln!(out, "{}", body.trim());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "分析总结: {}", narrative.summary.trim());

    out
}
