//! Solution catalog for the EdgeVision analytics service
//!
//! This crate provides the concurrent catalog of solution templates shared
//! by every request-handling thread, plus the built-in solutions registered
//! at startup.
//!
//! # Key Components
//!
//! - [`SolutionRegistry`] - Thread-safe catalog with register/lookup/list
//!   operations and an instantiation entry point
//! - [`builtin`] - The built-in solution templates (face detection, object
//!   detection, behavior analysis)
//!
//! # Example
//!
//! ```
//! use edgevision_solutions::SolutionRegistry;
//! use std::collections::BTreeMap;
//!
//! // At startup, the composition root builds one registry and injects it.
//! let registry = SolutionRegistry::with_defaults();
//!
//! // Per request: resolve a solution into a concrete pipeline.
//! let mut params = BTreeMap::new();
//! params.insert("RTSP_URL".to_string(), "rtsp://cam1".to_string());
//! params.insert("MODEL_PATH".to_string(), "/models/yunet.onnx".to_string());
//!
//! let pipeline = registry
//!     .instantiate("face_detection", &params, Some("abc123"))
//!     .unwrap();
//! assert_eq!(pipeline.nodes.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtin;
mod registry;

pub use registry::SolutionRegistry;
