//! Skill-gap roadmap pipeline — same retrieval mechanics as chat, but the
//! model is asked for a structured JSON plan and the typed result is the
//! schema check: a malformed response fails the whole call.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::rag::join_context;
use crate::rag::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::vector_index::{VectorError, VectorIndexClient};

/// Roadmap retrieval pulls slightly more context than chat.
const TOP_K: usize = 6;
/// Low temperature favors deterministic, parseable output.
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
}

/// The structured plan returned to the client verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPlan {
    pub missing_skills: Vec<String>,
    pub steps: Vec<RoadmapStep>,
}

/// Builds a skill-gap plan for `target_role` from the owner's resume vectors.
pub async fn build_roadmap(
    llm: &GeminiClient,
    vectors: &VectorIndexClient,
    target_role: &str,
    owner_id: Option<&str>,
) -> Result<RoadmapPlan, AppError> {
    let embedding = llm
        .embed(target_role)
        .await
        .map_err(|e| AppError::Roadmap(format!("target role embedding failed: {e}")))?;

    let hits = vectors
        .search(&embedding, TOP_K, owner_id)
        .await
        .map_err(vector_to_roadmap)?;

    let context = join_context(&hits);
    let prompt = ROADMAP_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{context}", &context);

    llm.generate_json::<RoadmapPlan>(&prompt, ROADMAP_SYSTEM, TEMPERATURE)
        .await
        .map_err(|e| AppError::Roadmap(format!("plan generation failed: {e}")))
}

fn vector_to_roadmap(e: VectorError) -> AppError {
    match e {
        VectorError::Unreachable(msg) => AppError::VectorUnavailable(msg),
        other => AppError::Roadmap(format!("vector search failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PLAN: &str = r#"{
        "missing_skills": ["Kubernetes", "Terraform"],
        "steps": [
            {
                "title": "Learn container orchestration",
                "description": "Deploy a small service to a managed cluster.",
                "difficulty": "Beginner",
                "estimated_time": "3 weeks"
            },
            {
                "title": "Infrastructure as code",
                "description": "Rebuild the deployment with Terraform modules.",
                "difficulty": "Intermediate",
                "estimated_time": "1 month"
            }
        ]
    }"#;

    #[test]
    fn test_full_plan_deserializes() {
        let plan: RoadmapPlan = serde_json::from_str(FULL_PLAN).unwrap();
        assert_eq!(plan.missing_skills.len(), 2);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].difficulty, Difficulty::Beginner);
        assert_eq!(plan.steps[1].estimated_time, "1 month");
    }

    #[test]
    fn test_plan_serializes_with_expected_keys() {
        let plan: RoadmapPlan = serde_json::from_str(FULL_PLAN).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("missing_skills").is_some());
        assert_eq!(json["steps"][0]["difficulty"], "Beginner");
    }

    #[test]
    fn test_difficulty_serde_roundtrip() {
        for (text, variant) in [
            ("\"Beginner\"", Difficulty::Beginner),
            ("\"Intermediate\"", Difficulty::Intermediate),
            ("\"Advanced\"", Difficulty::Advanced),
        ] {
            let parsed: Difficulty = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, variant);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), text);
        }
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let result = serde_json::from_str::<Difficulty>("\"Expert\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = serde_json::from_str::<RoadmapPlan>(r#"{"missing_skills": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_step_shape_rejected() {
        let result = serde_json::from_str::<RoadmapPlan>(
            r#"{"missing_skills": [], "steps": [{"title": "x"}]}"#,
        );
        assert!(result.is_err());
    }
}
