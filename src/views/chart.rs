use std::fmt::Write;

use crate::analysis::GenderStatistics;

/// Placeholder shown when no characters were detected.
pub const NO_CHARACTERS: &str = "未检测到人物";

const BAR_WIDTH: usize = 24;

/// Render the gender ratio as proportion bars.
///
/// Unknown-gender characters get a row only when there are any.
pub fn render_gender_ratio(stats: &GenderStatistics) -> String {
    let total = stats.total();
    if total == 0 {
        return format!("{}\n", NO_CHARACTERS);
    }

    let mut rows = vec![("男性", stats.male_count), ("女性", stats.female_count)];
    if stats.unknown_count > 0 {
        rows.push(("未明", stats.unknown_count));
    }

    let mut out = String::new();
    for (label, count) in rows {
        let share = f64::from(count) / total as f64;
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{label} {}{} {:>5.1}% ({count})",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            share * 100.0,
        );
    }
    out
}
