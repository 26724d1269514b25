use serde::{Deserialize, Serialize};

/// Surface-level statistics: character counts and explicit role titles.
///
/// Role lists are expected to hold only formal titles (e.g. "经理"), never
/// activities. That is a content contract on the model's output and is not
/// checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderStatistics {
    /// Characters presented as male.
    pub male_count: u32,
    /// Characters presented as female.
    pub female_count: u32,
    /// Characters whose gender is not stated.
    pub unknown_count: u32,
    /// Formal titles held by male characters.
    pub male_roles: Vec<String>,
    /// Formal titles held by female characters.
    pub female_roles: Vec<String>,
}

/// Free-text commentary on the latent level of the narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeAnalysis {
    /// Who decides and who follows in the plot.
    pub power_dynamics: String,
    /// Traits attributed to each gender.
    pub adjective_analysis: String,
    /// Public versus private spheres of action.
    pub social_roles: String,
    /// One-paragraph conclusion.
    pub summary: String,
}

/// Concrete rewrite advice and questions for reflection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementSuggestions {
    /// Ordered rewrite tips.
    pub rewrite_tips: Vec<String>,
    /// Open questions for discussion.
    pub reflection_questions: Vec<String>,
}

/// One complete analysis reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Surface-level counts and roles.
    pub stats: GenderStatistics,
    /// Latent-level commentary.
    pub narrative: NarrativeAnalysis,
    /// Improvement suggestions.
    pub suggestions: ImprovementSuggestions,
}

impl GenderStatistics {
    /// Total number of characters of any gender.
    pub fn total(&self) -> u64 {
        u64::from(self.male_count) + u64::from(self.female_count) + u64::from(self.unknown_count)
    }

    /// No characters were detected at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl AnalysisResult {
    /// Parse a model reply. Any missing field or wrong type is an error.
    pub fn from_reply(reply: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(reply.trim())
    }
}
