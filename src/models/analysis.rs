use serde::{Deserialize, Serialize};

/// One day of an AI-generated itinerary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dining: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<String>,
    #[serde(default)]
    pub estimated_cost: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Activity,
    Restaurant,
    Hotel,
    Experience,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub why_recommended: String,
    #[serde(default)]
    pub estimated_cost: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Normalized itinerary preview returned by the AI adapter. Ephemeral,
/// never persisted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripAnalysis {
    pub breakdown: Vec<DayPlan>,
    pub recommendations: Vec<Recommendation>,
    pub total_estimated_cost: u64,
    pub summary: String,
    pub tips: Vec<String>,
}
