//! EdgeVision Core - data model and instantiation algorithm for analytics pipelines
//!
//! This crate defines the solution template data model and the pure
//! algorithm that turns a template plus caller-supplied parameters into a
//! fully-resolved pipeline node sequence, without any transport or execution
//! dependencies.
//!
//! # Architecture
//!
//! edgevision-core is a pure library that:
//! - Defines the template types (`SolutionConfig`, `NodeConfig`) and their
//!   resolved counterparts (`ResolvedPipeline`, `ResolvedNode`)
//! - Implements parameter merge and placeholder substitution (`params`)
//! - Has ZERO dependencies on transport or inference crates
//!
//! The concurrent solution catalog lives in the `edgevision-solutions`
//! crate; the HTTP layer and the pipeline execution engine are separate
//! collaborators that consume these types.
//!
//! # Example
//!
//! ```
//! use edgevision_core::solution::{NodeConfig, SolutionConfig};
//! use std::collections::BTreeMap;
//!
//! let solution = SolutionConfig::new("face_detection", "Face Detection")
//!     .with_node(
//!         NodeConfig::new("rtsp_src", "rtsp_src_{instanceId}")
//!             .with_param("rtsp_url", "${RTSP_URL}"),
//!     )
//!     .with_default("detectionSensitivity", "0.7");
//!
//! let mut request = BTreeMap::new();
//! request.insert("RTSP_URL".to_string(), "rtsp://cam1".to_string());
//!
//! let pipeline = solution.instantiate(&request, Some("abc123")).unwrap();
//! assert_eq!(pipeline.nodes[0].node_name, "rtsp_src_abc123");
//! assert_eq!(pipeline.nodes[0].parameters["rtsp_url"], "rtsp://cam1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod params;
pub mod solution;

mod error;
pub use error::{Error, Result};
pub use solution::{NodeConfig, ResolvedNode, ResolvedPipeline, SolutionConfig};

/// Initialize the EdgeVision core library
///
/// This should be called once at startup to initialize logging.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("EdgeVision core initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        // Should not panic
        init().ok();
    }
}
