//! Parameter merge and placeholder substitution
//!
//! Turns a solution's defaults plus caller-supplied request parameters into an
//! effective parameter map, and resolves placeholder tokens inside template
//! strings against that map. Substitution is pure and operates only on
//! caller-owned copies, so it needs no synchronization and runs concurrently
//! across request-handling threads.
//!
//! Two placeholder forms appear side by side in solution templates and both
//! resolve against the same map:
//!
//! - `${KEY}` - conventionally used for caller-supplied values (`${RTSP_URL}`)
//! - `{KEY}`  - conventionally used for the instance identifier (`{instanceId}`)
//!
//! Keys match `[A-Za-z0-9_]+` and are compared case-sensitively. Anything
//! else between braces is not a placeholder and passes through untouched.
//! Substituted values are not re-scanned.

mod error;

pub use error::{SubstitutionError, TemplateField};

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Reserved parameter key carrying the pipeline instance identifier
pub const INSTANCE_ID_KEY: &str = "instanceId";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // `${KEY}` must be tried before `{KEY}` so the dollar form wins
        // when both could match at the same offset.
        Regex::new(r"\$\{([A-Za-z0-9_]+)\}|\{([A-Za-z0-9_]+)\}")
            .expect("placeholder pattern is valid")
    })
}

/// Key of the first placeholder in a template with no value in the
/// effective parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedKey(
    /// The placeholder key lacking a value
    pub String,
);

/// Build the effective parameter map for one instantiation
///
/// Defaults are applied first, caller-supplied request parameters overlay
/// them (caller wins on key collision), and the reserved `instanceId` key is
/// set last. The instance identifier always wins, even if a caller smuggled
/// an `instanceId` entry into the request map with a different value.
pub fn effective_parameters(
    defaults: &BTreeMap<String, String>,
    request: &BTreeMap<String, String>,
    instance_id: &str,
) -> BTreeMap<String, String> {
    let mut effective = defaults.clone();
    for (key, value) in request {
        effective.insert(key.clone(), value.clone());
    }
    effective.insert(INSTANCE_ID_KEY.to_string(), instance_id.to_string());
    effective
}

/// Resolve every placeholder in a template string against `params`
///
/// Returns the fully-resolved string, or the key of the first placeholder
/// with no matching entry. Resolution is a single left-to-right pass;
/// placeholder syntax appearing inside a substituted value is emitted
/// literally rather than resolved again.
pub fn resolve_template(
    template: &str,
    params: &BTreeMap<String, String>,
) -> Result<String, UnresolvedKey> {
    let pattern = placeholder_pattern();
    let mut resolved = String::with_capacity(template.len());
    let mut last_end = 0;

    for captures in pattern.captures_iter(template) {
        let token = captures.get(0).expect("capture group 0 always present");
        let key = captures
            .get(1)
            .or_else(|| captures.get(2))
            .expect("pattern has exactly one key group per alternative")
            .as_str();

        let value = params
            .get(key)
            .ok_or_else(|| UnresolvedKey(key.to_string()))?;

        resolved.push_str(&template[last_end..token.start()]);
        resolved.push_str(value);
        last_end = token.end();
    }

    resolved.push_str(&template[last_end..]);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_dollar_form() {
        let p = params(&[("RTSP_URL", "rtsp://cam1")]);
        assert_eq!(
            resolve_template("${RTSP_URL}", &p).unwrap(),
            "rtsp://cam1"
        );
    }

    #[test]
    fn test_resolve_brace_form() {
        let p = params(&[("instanceId", "abc123")]);
        assert_eq!(
            resolve_template("rtsp_src_{instanceId}", &p).unwrap(),
            "rtsp_src_abc123"
        );
    }

    #[test]
    fn test_both_forms_in_one_template() {
        let p = params(&[("instanceId", "abc123"), ("SAVE_ROOT", "/data")]);
        assert_eq!(
            resolve_template("${SAVE_ROOT}/output/{instanceId}", &p).unwrap(),
            "/data/output/abc123"
        );
    }

    #[test]
    fn test_literal_text_passes_through() {
        let p = params(&[]);
        assert_eq!(resolve_template("0.5", &p).unwrap(), "0.5");
        // Braced text that is not a bare key is not a placeholder
        assert_eq!(
            resolve_template(r#"{"zones": []}"#, &p).unwrap(),
            r#"{"zones": []}"#
        );
    }

    #[test]
    fn test_unresolved_key_reported() {
        let p = params(&[("MODEL_PATH", "/models/yunet.onnx")]);
        let err = resolve_template("${RTSP_URL}", &p).unwrap_err();
        assert_eq!(err, UnresolvedKey("RTSP_URL".to_string()));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let p = params(&[("rtsp_url", "rtsp://cam1")]);
        let err = resolve_template("${RTSP_URL}", &p).unwrap_err();
        assert_eq!(err.0, "RTSP_URL");
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let p = params(&[("PROMPT", "describe ${SCENE}")]);
        // The ${SCENE} inside the substituted value is emitted literally.
        assert_eq!(
            resolve_template("${PROMPT}", &p).unwrap(),
            "describe ${SCENE}"
        );
    }

    #[test]
    fn test_effective_parameters_caller_wins() {
        let defaults = params(&[("detectionSensitivity", "0.7"), ("sensorModality", "RGB")]);
        let request = params(&[("detectionSensitivity", "0.9")]);
        let effective = effective_parameters(&defaults, &request, "abc123");
        assert_eq!(effective["detectionSensitivity"], "0.9");
        assert_eq!(effective["sensorModality"], "RGB");
        assert_eq!(effective[INSTANCE_ID_KEY], "abc123");
    }

    #[test]
    fn test_effective_parameters_instance_id_wins_over_request() {
        let request = params(&[("instanceId", "spoofed")]);
        let effective = effective_parameters(&BTreeMap::new(), &request, "real");
        assert_eq!(effective[INSTANCE_ID_KEY], "real");
    }
}
