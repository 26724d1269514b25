//! Application controller.
//!
//! [`App`] owns the transient UI state (input, status, current result,
//! active tab, error message) and the [`HistoryStore`]. All mutations go
//! through named actions; views only read.
//!
//! ```text
//! Idle ──submit──▶ Analyzing ──ok──▶ Complete
//!   ▲                   └──err──▶ Error
//!   └──── edit / load example ────┘
//! ```

mod samples;

pub use samples::Sample;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::analysis::{AnalysisResult, Analyzer};
use crate::error::{ActionError, AnalysisError, AppResult};
use crate::history::{HistoryEntry, HistoryStore};

/// Analysis status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Waiting for input.
    #[default]
    Idle,
    /// A request is in flight; submission is disabled.
    Analyzing,
    /// A result is available.
    Complete,
    /// The last analysis failed.
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Analyzing => write!(f, "analyzing"),
            Status::Complete => write!(f, "complete"),
            Status::Error => write!(f, "error"),
        }
    }
}

/// Result view tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// Statistics and narrative analysis.
    #[default]
    Report,
    /// Rewrite tips and reflection questions.
    Suggestions,
    /// Past analyses, newest first.
    History,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Tab; 3] = [Tab::Report, Tab::Suggestions, Tab::History];

    /// Tab bar label
    pub fn label(self) -> &'static str {
        match self {
            Tab::Report => "分析报告",
            Tab::Suggestions => "改进建议",
            Tab::History => "历史记录",
        }
    }

    /// Whether the tab needs a completed analysis to be shown
    pub fn requires_result(self) -> bool {
        !matches!(self, Tab::History)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Report => write!(f, "report"),
            Tab::Suggestions => write!(f, "suggestions"),
            Tab::History => write!(f, "history"),
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(Tab::Report),
            "suggestions" => Ok(Tab::Suggestions),
            "history" => Ok(Tab::History),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}

/// A submission accepted by [`App::begin_analysis`], waiting for its outcome.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    text: String,
    submitted_at: DateTime<Utc>,
}

impl PendingAnalysis {
    /// Text that was submitted
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the text was submitted
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Derived state the views need beyond the raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// A completed result is on screen.
    pub has_result: bool,
    /// The tab area is visible at all.
    pub show_tabs: bool,
    /// The submit control is enabled.
    pub can_submit: bool,
    /// Number of stored entries.
    pub history_len: usize,
}

/// The application controller.
pub struct App {
    analyzer: Arc<dyn Analyzer>,
    history: HistoryStore,
    input: String,
    status: Status,
    result: Option<AnalysisResult>,
    active_tab: Tab,
    error_message: Option<String>,
}

impl App {
    /// Create the controller over an already loaded history.
    pub fn new(analyzer: Arc<dyn Analyzer>, history: HistoryStore) -> Self {
        let mut app = Self {
            analyzer,
            history,
            input: String::new(),
            status: Status::Idle,
            result: None,
            active_tab: Tab::Report,
            error_message: None,
        };
        app.settle_tab();
        app
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current result, present only when status is [`Status::Complete`]
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Tab currently shown
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Message of the last failed analysis, if the status is [`Status::Error`]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// History entries, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Derived view state
    pub fn view(&self) -> ViewState {
        let has_result = self.has_result();
        ViewState {
            has_result,
            show_tabs: has_result || !self.history.is_empty(),
            can_submit: self.can_submit(),
            history_len: self.history.len(),
        }
    }

    fn has_result(&self) -> bool {
        self.status == Status::Complete && self.result.is_some()
    }

    /// Submission is possible: not analyzing and the input is not blank
    pub fn can_submit(&self) -> bool {
        self.status != Status::Analyzing && !self.input.trim().is_empty()
    }

    /// Replace the input text (a user edit).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.discard_outcome();
    }

    /// Append a line to the input text (a user edit).
    ///
    /// Blank lines only separate paragraphs of a draft being typed. With no
    /// draft, or with a result or error on screen, they change nothing.
    pub fn push_input_line(&mut self, line: &str) {
        if line.trim().is_empty() && (self.input.is_empty() || self.status != Status::Idle) {
            return;
        }
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
        self.discard_outcome();
    }

    /// Replace the input with a built-in example.
    pub fn load_example(&mut self, sample: Sample) {
        debug!(sample = %sample, "Loading example text");
        self.input = sample.text().to_string();
        self.discard_outcome();
    }

    /// Accept the current input for analysis.
    ///
    /// Refused while an analysis is in flight or when the input is blank;
    /// in both cases nothing changes.
    pub fn begin_analysis(&mut self) -> Result<PendingAnalysis, ActionError> {
        if self.status == Status::Analyzing {
            return Err(ActionError::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(ActionError::EmptyInput);
        }

        self.status = Status::Analyzing;
        self.result = None;
        self.error_message = None;
        self.active_tab = Tab::Report;

        Ok(PendingAnalysis {
            text: self.input.clone(),
            submitted_at: Utc::now(),
        })
    }

    /// Apply the outcome of a pending analysis.
    ///
    /// On success the result becomes current and a history entry is
    /// prepended. On failure the error's user message is recorded and the
    /// history is left alone. Returns the new status; the only error is a
    /// failed history write, in which case the result is still shown.
    pub async fn finish_analysis(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> AppResult<Status> {
        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.status = Status::Complete;

                let id = self.history.next_id(Utc::now());
                let entry = HistoryEntry::new(id, pending.submitted_at, pending.text, result);
                let entry_id = entry.id.clone();

                if let Err(e) = self.history.append(entry).await {
                    error!(error = %e, "Failed to save analysis to history");
                    return Err(e.into());
                }

                info!(
                    entry_id = %entry_id,
                    history_len = self.history.len(),
                    "Analysis complete"
                );
            }
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "Analysis failed");
                self.error_message = Some(e.user_message().to_string());
                self.status = Status::Error;
            }
        }

        Ok(self.status)
    }

    /// Analyze the current input: [`Self::begin_analysis`], one analyzer
    /// call, then [`Self::finish_analysis`].
    pub async fn submit(&mut self) -> AppResult<Status> {
        let pending = self.begin_analysis()?;

        info!(chars = pending.text.chars().count(), "Submitting text for analysis");
        let outcome = self.analyzer.analyze(&pending.text).await;

        self.finish_analysis(pending, outcome).await
    }

    /// Switch the active tab. Report and suggestions need a result.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), ActionError> {
        if tab.requires_result() && !self.has_result() {
            return Err(ActionError::TabUnavailable {
                tab: tab.to_string(),
            });
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Show a stored entry as the current result without re-analyzing.
    pub fn load_history_entry(&mut self, id: &str) -> Result<(), ActionError> {
        if self.status == Status::Analyzing {
            return Err(ActionError::Busy);
        }

        let entry = self
            .history
            .get(id)
            .ok_or_else(|| ActionError::HistoryEntryNotFound { id: id.to_string() })?;

        self.input = entry.text.clone();
        self.result = Some(entry.result.clone());
        self.status = Status::Complete;
        self.error_message = None;
        self.active_tab = Tab::Report;

        debug!(entry_id = %id, "History entry loaded");
        Ok(())
    }

    /// Delete a stored entry. Allowed in any status; the status is kept.
    pub async fn delete_history_entry(&mut self, id: &str) -> AppResult<bool> {
        let removed = self.history.remove(id).await?;
        if removed {
            info!(entry_id = %id, "History entry deleted");
        }
        self.settle_tab();
        Ok(removed)
    }

    /// Complete|Error → Idle on an edit, discarding the result and error.
    fn discard_outcome(&mut self) {
        if matches!(self.status, Status::Complete | Status::Error) {
            self.status = Status::Idle;
            self.result = None;
            self.error_message = None;
            self.active_tab = Tab::Report;
        }
        self.settle_tab();
    }

    /// With nothing to report but a history to show, show the history.
    fn settle_tab(&mut self) {
        if self.status == Status::Idle && self.result.is_none() && !self.history.is_empty() {
            self.active_tab = Tab::History;
        }
    }
}
