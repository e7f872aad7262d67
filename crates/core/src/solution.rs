//! Solution template parsing, validation, and instantiation
//!
//! This module defines the solution data model (an ordered pipeline of node
//! templates with parameter placeholders) and the algorithm that resolves a
//! template plus caller-supplied parameters into a concrete pipeline ready
//! for the execution engine.

use crate::params::{
    self, SubstitutionError, TemplateField, INSTANCE_ID_KEY,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stage of a solution pipeline template
///
/// The node type and parameter vocabulary are opaque to the registry; they
/// are meaningful only to the downstream execution engine and pass through
/// unmodified except for placeholder resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    /// Processing stage kind (e.g., "rtsp_src", "yunet_face_detector")
    pub node_type: String,

    /// Name template, may contain placeholders (e.g., "rtsp_src_{instanceId}")
    pub node_name: String,

    /// Node parameters; values may contain zero or more placeholders
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl NodeConfig {
    /// Create a node template with no parameters
    pub fn new(node_type: impl Into<String>, node_name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            node_name: node_name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter template value
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// A solution template definition
///
/// Describes how to build a pipeline for one analytics use case. Immutable
/// after construction; the registry stores value copies and instantiation
/// always operates on a copy, so no caller observes another caller's
/// mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionConfig {
    /// Unique solution ID, the registry's lookup key
    pub solution_id: String,

    /// Human-readable name
    #[serde(default)]
    pub solution_name: String,

    /// Solution type tag ("face_detection", "object_detection", ...)
    #[serde(default)]
    pub solution_type: String,

    /// Built-in solutions are flagged default and cannot be updated or
    /// deleted through the mutation operations
    #[serde(default)]
    pub is_default: bool,

    /// Ordered node templates; order is the execution order the engine
    /// will honor
    pub pipeline: Vec<NodeConfig>,

    /// Fallback parameter values applied when the caller does not override
    /// the key
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// A fully-resolved pipeline stage with no remaining placeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    /// Processing stage kind, passed through from the template
    pub node_type: String,

    /// Resolved node name, unique per pipeline instance
    pub node_name: String,

    /// Resolved parameter values
    pub parameters: BTreeMap<String, String>,
}

/// The output of instantiating a solution template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPipeline {
    /// ID of the solution this pipeline was instantiated from
    pub solution_id: String,

    /// Instance identifier, caller-supplied or generated
    pub instance_id: String,

    /// Resolved nodes in template order
    pub nodes: Vec<ResolvedNode>,
}

impl SolutionConfig {
    /// Create a solution template with an empty pipeline
    pub fn new(solution_id: impl Into<String>, solution_name: impl Into<String>) -> Self {
        Self {
            solution_id: solution_id.into(),
            solution_name: solution_name.into(),
            ..Default::default()
        }
    }

    /// Set the solution type tag
    pub fn with_type(mut self, solution_type: impl Into<String>) -> Self {
        self.solution_type = solution_type.into();
        self
    }

    /// Append a node template to the pipeline
    pub fn with_node(mut self, node: NodeConfig) -> Self {
        self.pipeline.push(node);
        self
    }

    /// Add a default parameter value
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Resolve this template into a concrete pipeline
    ///
    /// Builds the effective parameter map (defaults, then request overrides,
    /// then the reserved `instanceId` key) and substitutes every placeholder
    /// in every node's name and parameter values, preserving pipeline order.
    /// When `instance_id` is `None` a fresh UUID v4 is generated.
    ///
    /// Fails fast on the first unresolved placeholder rather than emitting a
    /// pipeline with a literal token the execution engine would consume.
    pub fn instantiate(
        &self,
        request: &BTreeMap<String, String>,
        instance_id: Option<&str>,
    ) -> Result<ResolvedPipeline> {
        let instance_id = match instance_id {
            Some(id) => id.to_string(),
            None => match request.get(INSTANCE_ID_KEY) {
                Some(id) => id.clone(),
                None => uuid::Uuid::new_v4().to_string(),
            },
        };

        let effective = params::effective_parameters(&self.defaults, request, &instance_id);

        let mut nodes = Vec::with_capacity(self.pipeline.len());
        for (index, template) in self.pipeline.iter().enumerate() {
            let node_name = params::resolve_template(&template.node_name, &effective)
                .map_err(|unresolved| {
                    SubstitutionError::new(
                        index,
                        &template.node_type,
                        TemplateField::NodeName,
                        unresolved.0,
                    )
                })?;

            let mut parameters = BTreeMap::new();
            for (key, value) in &template.parameters {
                let resolved =
                    params::resolve_template(value, &effective).map_err(|unresolved| {
                        SubstitutionError::new(
                            index,
                            &template.node_type,
                            TemplateField::Parameter(key.clone()),
                            unresolved.0,
                        )
                    })?;
                parameters.insert(key.clone(), resolved);
            }

            nodes.push(ResolvedNode {
                node_type: template.node_type.clone(),
                node_name,
                parameters,
            });
        }

        tracing::debug!(
            solution_id = %self.solution_id,
            instance_id = %instance_id,
            nodes = nodes.len(),
            "Instantiated solution pipeline"
        );

        Ok(ResolvedPipeline {
            solution_id: self.solution_id.clone(),
            instance_id,
            nodes,
        })
    }
}

/// Parse a JSON solution definition
pub fn parse(json: &str) -> Result<SolutionConfig> {
    let config: SolutionConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Validate a solution template for registrability
///
/// A solution with an empty ID or an empty pipeline can never be
/// successfully instantiated, so registration rejects it up front.
pub fn validate(config: &SolutionConfig) -> Result<()> {
    if config.solution_id.is_empty() {
        return Err(Error::InvalidSolution(
            "Solution ID must not be empty".to_string(),
        ));
    }

    if config.pipeline.is_empty() {
        return Err(Error::InvalidSolution(format!(
            "Solution '{}' must contain at least one node",
            config.solution_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_simple_solution() {
        let json = r#"{
            "solutionId": "motion_alert",
            "solutionName": "Motion Alert",
            "solutionType": "motion",
            "pipeline": [
                {
                    "nodeType": "rtsp_src",
                    "nodeName": "rtsp_src_{instanceId}",
                    "parameters": { "rtsp_url": "${RTSP_URL}" }
                }
            ],
            "defaults": { "sensorModality": "RGB" }
        }"#;

        let config = parse(json).unwrap();
        assert_eq!(config.solution_id, "motion_alert");
        assert_eq!(config.pipeline.len(), 1);
        assert_eq!(config.pipeline[0].node_type, "rtsp_src");
        assert!(!config.is_default);
        assert_eq!(config.defaults["sensorModality"], "RGB");
    }

    #[test]
    fn test_validate_empty_id() {
        let config = SolutionConfig::new("", "Nameless")
            .with_node(NodeConfig::new("rtsp_src", "src_{instanceId}"));
        assert!(matches!(
            validate(&config),
            Err(Error::InvalidSolution(_))
        ));
    }

    #[test]
    fn test_validate_empty_pipeline() {
        let config = SolutionConfig::new("empty", "Empty");
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("at least one node"));
    }

    #[test]
    fn test_instantiate_preserves_node_order() {
        let config = SolutionConfig::new("ordered", "Ordered")
            .with_node(NodeConfig::new("rtsp_src", "src_{instanceId}"))
            .with_node(NodeConfig::new("yunet_face_detector", "det_{instanceId}"))
            .with_node(NodeConfig::new("file_des", "des_{instanceId}"));

        let pipeline = config.instantiate(&request(&[]), Some("i1")).unwrap();
        let types: Vec<_> = pipeline.nodes.iter().map(|n| n.node_type.as_str()).collect();
        assert_eq!(types, ["rtsp_src", "yunet_face_detector", "file_des"]);
        assert_eq!(pipeline.nodes[0].node_name, "src_i1");
    }

    #[test]
    fn test_instantiate_generates_instance_id_when_absent() {
        let config = SolutionConfig::new("gen", "Generated")
            .with_node(NodeConfig::new("rtsp_src", "src_{instanceId}"));

        let pipeline = config.instantiate(&request(&[]), None).unwrap();
        assert!(!pipeline.instance_id.is_empty());
        assert_eq!(
            pipeline.nodes[0].node_name,
            format!("src_{}", pipeline.instance_id)
        );
    }

    #[test]
    fn test_instantiate_takes_instance_id_from_request_map() {
        let config = SolutionConfig::new("req", "Request")
            .with_node(NodeConfig::new("rtsp_src", "src_{instanceId}"));

        let pipeline = config
            .instantiate(&request(&[("instanceId", "abc123")]), None)
            .unwrap();
        assert_eq!(pipeline.instance_id, "abc123");
        assert_eq!(pipeline.nodes[0].node_name, "src_abc123");
    }

    #[test]
    fn test_instantiate_unresolved_reports_node_and_field() {
        let config = SolutionConfig::new("strict", "Strict").with_node(
            NodeConfig::new("rtsp_src", "src_{instanceId}")
                .with_param("rtsp_url", "${RTSP_URL}"),
        );

        let err = config.instantiate(&request(&[]), Some("i1")).unwrap_err();
        match err {
            Error::Unresolved(sub) => {
                assert_eq!(sub.node_index, 0);
                assert_eq!(sub.node_type, "rtsp_src");
                assert_eq!(sub.key, "RTSP_URL");
                assert_eq!(
                    sub.field,
                    TemplateField::Parameter("rtsp_url".to_string())
                );
            }
            other => panic!("Expected Unresolved error, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_does_not_mutate_template() {
        let config = SolutionConfig::new("pure", "Pure").with_node(
            NodeConfig::new("rtsp_src", "src_{instanceId}")
                .with_param("rtsp_url", "${RTSP_URL}"),
        );
        let before = config.clone();

        config
            .instantiate(&request(&[("RTSP_URL", "rtsp://cam1")]), Some("i1"))
            .unwrap();
        assert_eq!(config, before);
        assert_eq!(config.pipeline[0].parameters["rtsp_url"], "${RTSP_URL}");
    }
}
