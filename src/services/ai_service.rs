use std::error::Error;
use std::fmt;
use std::{env, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::analysis::{DayPlan, Recommendation, TripAnalysis};
use crate::models::trip::{BudgetTier, TripDuration};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const BREAKDOWN_TEMPERATURE: f32 = 0.7;
const BREAKDOWN_MAX_TOKENS: u32 = 3000;
const RECOMMENDATION_TEMPERATURE: f32 = 0.8;
const RECOMMENDATION_MAX_TOKENS: u32 = 2000;

const PLANNER_PERSONA: &str = "You are an expert luxury travel planner with deep knowledge of destinations worldwide. You create personalized, high-end travel experiences that exceed expectations. Always provide specific, actionable recommendations with realistic pricing.";

const CONCIERGE_PERSONA: &str = "You are a luxury travel expert who knows the hidden gems and exclusive experiences at destinations worldwide. Provide recommendations that go beyond typical tourist attractions.";

#[derive(Debug)]
pub enum AiServiceError {
    /// Caller supplied an unusable trip configuration.
    InvalidInput(String),
    /// Completion collaborator unreachable or answered with an error status.
    Upstream(String),
}

impl fmt::Display for AiServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiServiceError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AiServiceError::Upstream(msg) => write!(f, "AI service unavailable: {}", msg),
        }
    }
}

impl Error for AiServiceError {}

impl From<reqwest::Error> for AiServiceError {
    fn from(err: reqwest::Error) -> Self {
        AiServiceError::Upstream(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBreakdownRequest {
    pub destination: String,
    pub duration: TripDuration,
    pub budget: BudgetTier,
    pub experiences: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub destination: String,
    pub budget: BudgetTier,
    pub experiences: Vec<String>,
    #[serde(default)]
    pub previous_trips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Adapter around the completion collaborator: builds the itinerary prompt,
/// sends it, and normalizes the free-text reply into a [`TripAnalysis`].
#[derive(Clone)]
pub struct AiService {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AiService {
    pub fn from_env() -> Result<Self, AiServiceError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AiServiceError::Upstream("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let http = Client::builder().timeout(Duration::from_secs(60)).build()?;
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| OPENAI_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
        })
    }

    /// Day-by-day itinerary preview. Upstream failures surface as
    /// [`AiServiceError::Upstream`]; an unusable reply never does. The
    /// caller always receives some analysis, possibly the defaulted one.
    pub async fn generate_trip_breakdown(
        &self,
        request: &TripBreakdownRequest,
    ) -> Result<TripAnalysis, AiServiceError> {
        if request.destination.trim().is_empty() {
            return Err(AiServiceError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }

        let prompt = build_breakdown_prompt(request);
        let reply = self
            .complete(PLANNER_PERSONA, &prompt, BREAKDOWN_TEMPERATURE, BREAKDOWN_MAX_TOKENS)
            .await?;

        Ok(parse_trip_analysis(&reply, &request.destination))
    }

    pub async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, AiServiceError> {
        if request.destination.trim().is_empty() {
            return Err(AiServiceError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }

        let prompt = build_recommendation_prompt(request);
        let reply = self
            .complete(
                CONCIERGE_PERSONA,
                &prompt,
                RECOMMENDATION_TEMPERATURE,
                RECOMMENDATION_MAX_TOKENS,
            )
            .await?;

        Ok(parse_recommendations(&reply))
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AiServiceError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AiServiceError::Upstream(format!(
                "completion request failed with status {}: {}",
                status, text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiServiceError::Upstream("no completion content in reply".to_string()))
    }
}

fn build_breakdown_prompt(request: &TripBreakdownRequest) -> String {
    let days = request.duration.days();
    let notes = request
        .notes
        .as_deref()
        .filter(|notes| !notes.trim().is_empty())
        .unwrap_or("None");

    format!(
        r#"Create a detailed {days}-day luxury travel itinerary for {destination} with the following specifications:

Budget Range: {budget}
Duration: {days} days
Preferred Experiences: {experiences}
Special Notes: {notes}

Please provide:
1. A day-by-day breakdown with:
   - Day number and title
   - Detailed description of the day
   - 3-4 specific activities
   - Recommended accommodation (if overnight)
   - Dining recommendations
   - Transportation details
   - Estimated daily cost

2. 5-8 personalized recommendations for:
   - Unique activities
   - Fine dining restaurants
   - Luxury hotels
   - Special experiences

3. A summary paragraph about the trip
4. 3-5 insider tips for the destination

Format the response as JSON with this structure:
{{
  "breakdown": [
    {{
      "day": 1,
      "title": "Day Title",
      "description": "Detailed day description",
      "activities": ["Activity 1", "Activity 2", "Activity 3"],
      "accommodation": "Hotel name and brief description",
      "dining": "Restaurant recommendations",
      "transportation": "Transportation details",
      "estimatedCost": 500
    }}
  ],
  "recommendations": [
    {{
      "type": "activity|restaurant|hotel|experience",
      "name": "Name",
      "description": "Description",
      "whyRecommended": "Why this is perfect for this traveler",
      "estimatedCost": 200,
      "location": "Location if applicable"
    }}
  ],
  "totalEstimatedCost": 5000,
  "summary": "Overall trip summary",
  "tips": ["Tip 1", "Tip 2", "Tip 3"]
}}

Make it luxurious, personalized, and include insider knowledge that only a luxury travel expert would know."#,
        days = days,
        destination = request.destination,
        budget = request.budget.range_label(),
        experiences = request.experiences.join(", "),
        notes = notes,
    )
}

fn build_recommendation_prompt(request: &RecommendationRequest) -> String {
    let previous = if request.previous_trips.is_empty() {
        "None".to_string()
    } else {
        request.previous_trips.join(", ")
    };

    format!(
        r#"Based on the following traveler profile, suggest 6-8 unique luxury recommendations for {destination}:

Budget Range: {budget}
Preferred Experiences: {experiences}
Previous Destinations: {previous}

Provide recommendations that are:
- Within the budget range
- Aligned with their experience preferences
- Unique and not commonly found in guidebooks
- Suitable for luxury travelers
- Specific to {destination}

Format as JSON array:
[
  {{
    "type": "activity|restaurant|hotel|experience",
    "name": "Name",
    "description": "Detailed description",
    "whyRecommended": "Why this matches their preferences",
    "estimatedCost": 200,
    "location": "Specific location"
  }}
]"#,
        destination = request.destination,
        budget = request.budget.range_label(),
        experiences = request.experiences.join(", "),
        previous = previous,
    )
}

/// Parse policy for itinerary replies: direct JSON parse, then the first
/// fenced code block, then a defaulted analysis. Callers always get a
/// structure back.
pub fn parse_trip_analysis(reply: &str, destination: &str) -> TripAnalysis {
    match lenient_json(reply) {
        Some(value) => normalize_analysis(value, destination),
        None => fallback_analysis(destination),
    }
}

/// Recommendations arrive either as a bare array or wrapped in an object;
/// anything else is an empty list.
pub fn parse_recommendations(reply: &str) -> Vec<Recommendation> {
    match lenient_json(reply) {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        Some(value) => typed_entries(value.get("recommendations")),
        None => Vec::new(),
    }
}

fn lenient_json(reply: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(reply.trim()) {
        return Some(value);
    }
    serde_json::from_str(extract_fenced_block(reply)?).ok()
}

/// Contents of the first ``` fence, tolerating a `json` language tag.
fn extract_fenced_block(reply: &str) -> Option<&str> {
    let start = reply.find("```")? + 3;
    let rest = &reply[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

fn normalize_analysis(value: Value, destination: &str) -> TripAnalysis {
    let breakdown: Vec<DayPlan> = typed_entries(value.get("breakdown"));
    let recommendations: Vec<Recommendation> = typed_entries(value.get("recommendations"));

    let tips = value
        .get("tips")
        .and_then(Value::as_array)
        .map(|tips| {
            tips.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let total_estimated_cost = value
        .get("totalEstimatedCost")
        .and_then(Value::as_u64)
        .unwrap_or_else(|| breakdown.iter().map(|day| day.estimated_cost).sum());

    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .filter(|summary| !summary.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_summary(destination));

    TripAnalysis {
        breakdown,
        recommendations,
        total_estimated_cost,
        summary,
        tips,
    }
}

/// Entries that do not match the typed shape are dropped rather than
/// failing the whole reply.
fn typed_entries<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn fallback_analysis(destination: &str) -> TripAnalysis {
    TripAnalysis {
        breakdown: Vec::new(),
        recommendations: Vec::new(),
        total_estimated_cost: 0,
        summary: default_summary(destination),
        tips: Vec::new(),
    }
}

fn default_summary(destination: &str) -> String {
    format!(
        "Experience the best of {} with this carefully curated luxury itinerary designed for discerning travelers.",
        destination
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::RecommendationKind;

    #[test]
    fn test_garbage_reply_defaults_without_error() {
        let analysis = parse_trip_analysis("not json at all", "Paris");

        assert!(analysis.breakdown.is_empty());
        assert!(analysis.recommendations.is_empty());
        assert!(analysis.tips.is_empty());
        assert_eq!(analysis.total_estimated_cost, 0);
        assert!(analysis.summary.contains("Paris"));
    }

    #[test]
    fn test_fenced_reply_recovered() {
        let reply = r#"Here is your itinerary:
```json
{
  "breakdown": [
    {"day": 1, "title": "Arrival", "description": "Settle in", "activities": ["Check in"], "estimatedCost": 400}
  ],
  "summary": "A short stay.",
  "tips": ["Pack light"]
}
```
Enjoy!"#;

        let analysis = parse_trip_analysis(reply, "Tokyo");
        assert_eq!(analysis.breakdown.len(), 1);
        assert_eq!(analysis.breakdown[0].title, "Arrival");
        assert_eq!(analysis.summary, "A short stay.");
        assert_eq!(analysis.tips, vec!["Pack light".to_string()]);
    }

    #[test]
    fn test_total_cost_derived_from_days() {
        let reply = r#"{
            "breakdown": [
                {"day": 1, "title": "A", "description": "", "estimatedCost": 300},
                {"day": 2, "title": "B", "description": "", "estimatedCost": 450}
            ],
            "summary": "Two days."
        }"#;

        let analysis = parse_trip_analysis(reply, "Bali");
        assert_eq!(analysis.total_estimated_cost, 750);
    }

    #[test]
    fn test_explicit_total_cost_wins() {
        let reply = r#"{
            "breakdown": [{"day": 1, "title": "A", "description": "", "estimatedCost": 300}],
            "totalEstimatedCost": 5000,
            "summary": "One day."
        }"#;

        let analysis = parse_trip_analysis(reply, "Bali");
        assert_eq!(analysis.total_estimated_cost, 5000);
    }

    #[test]
    fn test_non_sequence_fields_default_independently() {
        let reply = r#"{
            "breakdown": "tomorrow we see",
            "recommendations": {"oops": true},
            "tips": 7,
            "summary": "Still usable."
        }"#;

        let analysis = parse_trip_analysis(reply, "Rome");
        assert!(analysis.breakdown.is_empty());
        assert!(analysis.recommendations.is_empty());
        assert!(analysis.tips.is_empty());
        assert_eq!(analysis.summary, "Still usable.");
    }

    #[test]
    fn test_missing_summary_synthesized() {
        let analysis = parse_trip_analysis(r#"{"breakdown": []}"#, "Kyoto");
        assert!(analysis.summary.contains("Kyoto"));
    }

    #[test]
    fn test_malformed_entries_dropped_not_fatal() {
        let reply = r#"{
            "recommendations": [
                {"type": "hotel", "name": "The Grand", "description": "Classic"},
                {"type": "castle", "name": "Unknown kind"},
                {"description": "missing name and type"}
            ],
            "summary": "Mixed bag."
        }"#;

        let analysis = parse_trip_analysis(reply, "Vienna");
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.recommendations[0].kind, RecommendationKind::Hotel);
        assert_eq!(analysis.recommendations[0].name, "The Grand");
    }

    #[test]
    fn test_recommendations_bare_array() {
        let reply = r#"[
            {"type": "activity", "name": "Hot springs", "estimatedCost": 120},
            {"type": "restaurant", "name": "Sukiyabashi"}
        ]"#;

        let recommendations = parse_recommendations(reply);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].kind, RecommendationKind::Activity);
    }

    #[test]
    fn test_recommendations_garbage_is_empty() {
        assert!(parse_recommendations("try again later").is_empty());
    }

    #[test]
    fn test_breakdown_prompt_embeds_configuration() {
        let request = TripBreakdownRequest {
            destination: "Paris".to_string(),
            duration: TripDuration::Week,
            budget: BudgetTier::Luxury,
            experiences: vec!["Culture".to_string(), "Food & Wine".to_string()],
            notes: Some("Anniversary trip".to_string()),
        };

        let prompt = build_breakdown_prompt(&request);
        assert!(prompt.contains("7-day luxury travel itinerary for Paris"));
        assert!(prompt.contains("$7,000 - $15,000"));
        assert!(prompt.contains("Culture, Food & Wine"));
        assert!(prompt.contains("Anniversary trip"));
    }
}
