use crate::{
    wire::{self, GenerateContentResponse},
    Advice, AdvisorError, Citation, Diagnosis,
};

/// Citations kept per advice response.
pub(crate) const MAX_CITATIONS: usize = 3;

pub(crate) const UNKNOWN_BLOCK_REASON: &str = "unknown reason";

pub(crate) fn parse_advice_body(body: &str) -> Result<Advice, AdvisorError> {
    let response = serde_json::from_str::<GenerateContentResponse>(body).map_err(|err| {
        AdvisorError::Decode(format!("invalid generateContent response JSON: {err}"))
    })?;
    decode_advice(response)
}

pub(crate) fn decode_advice(response: GenerateContentResponse) -> Result<Advice, AdvisorError> {
    let GenerateContentResponse {
        candidates,
        prompt_feedback,
    } = response;

    let first = candidates.into_iter().next();
    let text = first
        .as_ref()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .filter(|text| !text.is_empty());

    let Some(text) = text else {
        let reason = prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| UNKNOWN_BLOCK_REASON.to_owned());
        return Err(AdvisorError::Blocked { reason });
    };

    let citations = first
        .and_then(|candidate| candidate.grounding_metadata)
        .map(|metadata| decode_citations(metadata.grounding_attributions))
        .unwrap_or_default();

    Ok(Advice { text, citations })
}

fn decode_citations(attributions: Vec<wire::GroundingAttribution>) -> Vec<Citation> {
    attributions
        .into_iter()
        .filter_map(|attribution| attribution.web)
        .filter_map(|web| match (web.uri, web.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(Citation { uri, title })
            }
            _ => None,
        })
        .take(MAX_CITATIONS)
        .collect()
}

pub(crate) fn parse_diagnosis_body(body: &str) -> Result<Diagnosis, AdvisorError> {
    let response = serde_json::from_str::<wire::DiagnoseResponse>(body).map_err(|err| {
        AdvisorError::Decode(format!("invalid diagnosis response JSON: {err}; body: {body}"))
    })?;
    Ok(Diagnosis {
        disease: response.disease,
        treatment: response.treatment,
    })
}

/// Truncates to at most `max_chars` characters without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{decode, AdvisorError, Locale};

    fn attribution(uri: &str, title: &str) -> serde_json::Value {
        json!({ "web": { "uri": uri, "title": title } })
    }

    #[test]
    fn keeps_first_three_citations_in_order() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Irrigate at dawn." }] },
                "groundingMetadata": {
                    "groundingAttributions": [
                        attribution("https://a", "A"),
                        attribution("https://b", "B"),
                        attribution("https://c", "C"),
                        attribution("https://d", "D"),
                        attribution("https://e", "E")
                    ]
                }
            }]
        });

        let advice = decode::parse_advice_body(&body.to_string()).expect("must decode");
        assert_eq!(advice.text, "Irrigate at dawn.");
        let titles: Vec<&str> = advice.citations.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(advice.citations[2].uri, "https://c");
    }

    #[test]
    fn skips_citations_with_missing_uri_or_title() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "advice" }] },
                "groundingMetadata": {
                    "groundingAttributions": [
                        { "web": { "uri": "", "title": "empty uri" } },
                        { "web": { "uri": "https://no-title" } },
                        { "retrievedContext": {} },
                        attribution("https://ok", "OK")
                    ]
                }
            }]
        });

        let advice = decode::parse_advice_body(&body.to_string()).expect("must decode");
        assert_eq!(advice.citations.len(), 1);
        assert_eq!(advice.citations[0].title, "OK");
    }

    #[test]
    fn advice_without_grounding_has_no_citations() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "advice" }] } }]
        });
        let advice = decode::parse_advice_body(&body.to_string()).expect("must decode");
        assert!(advice.citations.is_empty());
    }

    #[test]
    fn missing_candidate_reports_block_reason() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = decode::parse_advice_body(&body.to_string()).expect_err("must fail");
        assert!(matches!(&err, AdvisorError::Blocked { reason } if reason == "SAFETY"));
        assert!(err.to_string().contains("SAFETY"));
        assert!(err.user_message(Locale::Arabic).detail.contains("SAFETY"));
    }

    #[test]
    fn empty_text_without_feedback_is_unknown_reason() {
        let body = json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] });
        let err = decode::parse_advice_body(&body.to_string()).expect_err("must fail");
        assert!(matches!(&err, AdvisorError::Blocked { reason } if reason == "unknown reason"));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode::parse_advice_body("not json").expect_err("must fail");
        assert!(matches!(err, AdvisorError::Decode(_)));
    }

    #[test]
    fn diagnosis_body_decodes_both_fields() {
        let diagnosis = decode::parse_diagnosis_body(
            r#"{"disease":"Late Blight","treatment":"Apply fungicide"}"#,
        )
        .expect("must decode");
        let text = diagnosis.render(Locale::English);
        assert!(text.contains("Late Blight"));
        assert!(text.contains("Apply fungicide"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(decode::truncate_chars("abcdef", 3), "abc");
        assert_eq!(decode::truncate_chars("ab", 3), "ab");
        assert_eq!(decode::truncate_chars("مرحبا", 2), "مر");
    }
}
