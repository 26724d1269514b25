//! Stateless text renderers.
//!
//! Every function here is a pure function of the data handed to it. Actions
//! are only hinted at (`:load <id>`), never performed.

mod chart;
mod history;
mod report;
mod suggestions;

pub use chart::{render_gender_ratio, NO_CHARACTERS};
pub use history::{excerpt, render_entry, render_history, EMPTY_HISTORY};
pub use report::{gender_headline, render_report, render_roles, NO_ROLES};
pub use suggestions::render_suggestions;

use std::fmt::Write;

use crate::app::{App, Sample, Status, Tab};

/// Tab bar, active tab in brackets and unavailable tabs struck out.
pub fn render_tab_bar(active: Tab, has_result: bool) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else if tab.requires_result() && !has_result {
                format!("~{}~", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_line(app: &App) -> String {
    match app.status() {
        Status::Analyzing => "正在分析...".to_string(),
        _ if app.can_submit() => "开始检测 (:analyze)".to_string(),
        _ => "输入文本进行检测".to_string(),
    }
}

/// Whole screen: input, submit state, inline error, tabs and active view.
pub fn render_app(app: &App) -> String {
    let view = app.view();
    let mut out = String::new();

    let _ = writeln!(out, "Gender Bias Detective - AI 驱动的叙事偏见分析工具");
    let _ = writeln!(out);

    if app.input().is_empty() {
        let _ = writeln!(out, "> (在此粘贴叙事文本、故事或文章...)");
    } else {
        for line in app.input().lines() {
            let _ = writeln!(out, "> {}", line);
        }
    }

    let examples = Sample::ALL
        .iter()
        .map(|s| format!("{} (:example {})", s.label(), s.number()))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", examples);

    let mut line = status_line(app);
    if view.history_len > 0 && app.status() == Status::Idle {
        let _ = write!(line, "  查看历史记录 ({})", view.history_len);
    }
    let _ = writeln!(out, "{}", line);

    if let Some(message) = app.error_message() {
        let _ = writeln!(out, "! {}", message);
    }

    if !view.show_tabs {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_tab_bar(app.active_tab(), view.has_result));
    let _ = writeln!(out);

    match (app.active_tab(), app.result()) {
        (Tab::Report, Some(result)) if view.has_result => out.push_str(&render_report(result)),
        (Tab::Suggestions, Some(result)) if view.has_result => {
            out.push_str(&render_suggestions(result))
        }
        (Tab::History, _) => out.push_str(&render_history(app.history())),
        _ => {}
    }

    out
}
