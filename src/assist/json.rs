// src/assist/json.rs
//! Pull JSON out of free-form model output and sanitize scores

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::core::GatewayError;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("fenced block pattern is valid")
});

/// Fenced ```json block first, then the whole text, then the outermost
/// `{...}` slice.
pub fn extract_json(content: &str) -> Result<Value, GatewayError> {
    let candidate = FENCED_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
        .trim();

    if let Ok(value) = serde_json::from_str(candidate) {
        return Ok(value);
    }

    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&content[start..=end])
            .map_err(|e| GatewayError::Malformed(e.to_string())),
        _ => Err(GatewayError::Malformed(
            "Could not parse AI response as JSON".to_string(),
        )),
    }
}

/// Clamp any numeric score into 0..=100.
pub fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.clamp(0.0, 100.0).round() as u8
}

/// Resume-analysis scores: non-numbers read as 50, values in (0, 15) are
/// taken as tenths (9 means 90), then clamped.
pub fn normalize_analysis_score(value: &Value) -> u8 {
    let Some(score) = value.as_f64() else {
        return 50;
    };
    if score > 0.0 && score < 15.0 {
        return clamp_score((score * 10.0).min(100.0));
    }
    clamp_score(score)
}

/// Rewrite every score in an analysis payload in place.
pub fn normalize_analysis_scores(result: &mut Value) {
    if let Some(overall) = result.get_mut("overall_score") {
        *overall = Value::from(normalize_analysis_score(overall));
    }
    if let Some(Value::Object(scores)) = result.get_mut("section_scores") {
        for score in scores.values_mut() {
            *score = Value::from(normalize_analysis_score(score));
        }
    }
    if let Some(Value::Object(sections)) = result.get_mut("sections") {
        for section in sections.values_mut() {
            if let Some(score) = section.get_mut("score") {
                *score = Value::from(normalize_analysis_score(score));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_fenced_json() {
        let content = "Here you go:\n```json\n{\"improved\": \"Led a team\"}\n```\nThanks";
        assert_eq!(extract_json(content).unwrap(), json!({"improved": "Led a team"}));
    }

    #[test]
    fn test_extract_bare_json() {
        assert_eq!(extract_json("  {\"a\": 1} ").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_extract_embedded_object() {
        let content = "Sure! {\"overall_score\": 80} hope that helps";
        assert_eq!(extract_json(content).unwrap(), json!({"overall_score": 80}));
    }

    #[test]
    fn test_extract_failure_is_malformed() {
        assert!(matches!(
            extract_json("no json here"),
            Err(GatewayError::Malformed(_))
        ));
        assert!(matches!(extract_json("} {"), Err(GatewayError::Malformed(_))));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(150.0), 100);
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(72.4), 72);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_normalize_analysis_score() {
        assert_eq!(normalize_analysis_score(&json!(9)), 90);
        assert_eq!(normalize_analysis_score(&json!(7.5)), 75);
        assert_eq!(normalize_analysis_score(&json!(15)), 15);
        assert_eq!(normalize_analysis_score(&json!(0)), 0);
        assert_eq!(normalize_analysis_score(&json!(150)), 100);
        assert_eq!(normalize_analysis_score(&json!(-5)), 0);
        assert_eq!(normalize_analysis_score(&json!("high")), 50);
        assert_eq!(normalize_analysis_score(&json!(null)), 50);
    }

    #[test]
    fn test_normalize_analysis_scores_in_place() {
        let mut result = json!({
            "overall_score": 8,
            "section_scores": {"formatting": 150, "grammar": "n/a"},
            "sections": {"summary": {"original": "x", "score": 6, "feedback": "ok"}}
        });
        normalize_analysis_scores(&mut result);
        assert_eq!(result["overall_score"], 80);
        assert_eq!(result["section_scores"]["formatting"], 100);
        assert_eq!(result["section_scores"]["grammar"], 50);
        assert_eq!(result["sections"]["summary"]["score"], 60);
    }
}
