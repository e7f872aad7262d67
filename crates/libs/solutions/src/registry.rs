//! Solution template registry
//!
//! Thread-safe catalog of solution templates keyed by solution ID. The
//! catalog is the only mutable shared state in this core: it is written
//! rarely (bootstrap, occasional custom registrations) and read once per
//! inbound request, so a single mutex over the map is sufficient. No I/O or
//! external call happens while the lock is held.

use std::collections::HashMap;
use std::sync::Mutex;

use edgevision_core::solution::{self, ResolvedPipeline, SolutionConfig};
use edgevision_core::{Error, Result};
use std::collections::BTreeMap;

use crate::builtin;

/// Registry of available solution templates
///
/// An explicit, constructible instance owned by the service's composition
/// root; inject it wherever needed. `Default` yields a catalog populated
/// with the built-in solutions.
///
/// # Thread Safety
///
/// Every operation acquires the catalog mutex for the duration of its map
/// access, bounding lock-hold time to map bookkeeping plus a value copy.
/// Two concurrent registrations for the same ID serialize in an unspecified
/// order; the catalog holds whichever write committed last.
pub struct SolutionRegistry {
    /// Solutions indexed by ID
    solutions: Mutex<HashMap<String, SolutionConfig>>,
}

impl SolutionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            solutions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry populated with the built-in solutions
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.initialize_default_solutions();
        registry
    }

    /// Register the built-in solutions
    ///
    /// Bootstrap entry point, called once at startup before requests are
    /// served. Re-running replaces the entries with identical content.
    pub fn initialize_default_solutions(&self) {
        for config in builtin::default_solutions() {
            if let Err(e) = self.register_solution(config) {
                // Built-in templates are constructed in this crate and
                // always pass validation; surface any regression loudly.
                tracing::error!(error = %e, "Failed to register built-in solution");
            }
        }
    }

    /// Register a solution template
    ///
    /// Inserts or replaces the entry for `config.solution_id`
    /// (last-write-wins; no merge of old and new pipelines). Rejects
    /// templates that can never be instantiated: empty ID or empty
    /// pipeline.
    pub fn register_solution(&self, config: SolutionConfig) -> Result<()> {
        solution::validate(&config)?;

        let mut solutions = self
            .solutions
            .lock()
            .map_err(|e| Error::LockPoisoned(e.to_string()))?;

        let id = config.solution_id.clone();
        let solution_type = config.solution_type.clone();
        let nodes = config.pipeline.len();
        let replaced = solutions.insert(id.clone(), config).is_some();

        tracing::info!(
            id = %id,
            solution_type = %solution_type,
            nodes,
            replaced,
            "Registered solution"
        );

        Ok(())
    }

    /// Get a value copy of a solution template by ID
    ///
    /// Never returns a live alias into the catalog: callers mutate their
    /// copy during instantiation while other threads may concurrently
    /// replace the entry.
    pub fn get_solution(&self, solution_id: &str) -> Option<SolutionConfig> {
        self.solutions
            .lock()
            .ok()
            .and_then(|solutions| solutions.get(solution_id).cloned())
    }

    /// List all registered solution IDs
    ///
    /// Sorted for determinism; callers must not rely on insertion order.
    pub fn list_solutions(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .solutions
            .lock()
            .map(|solutions| solutions.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Check whether a solution exists without copying the value
    pub fn has_solution(&self, solution_id: &str) -> bool {
        self.solutions
            .lock()
            .map(|solutions| solutions.contains_key(solution_id))
            .unwrap_or(false)
    }

    /// Get value copies of all registered solutions
    pub fn get_all_solutions(&self) -> HashMap<String, SolutionConfig> {
        self.solutions
            .lock()
            .map(|solutions| solutions.clone())
            .unwrap_or_default()
    }

    /// Update an existing solution
    ///
    /// Returns false if the solution does not exist, is a built-in default
    /// (defaults cannot be updated), or fails validation.
    pub fn update_solution(&self, config: SolutionConfig) -> bool {
        if let Err(e) = solution::validate(&config) {
            tracing::warn!(id = %config.solution_id, error = %e, "Rejected solution update");
            return false;
        }

        let Ok(mut solutions) = self.solutions.lock() else {
            return false;
        };

        match solutions.get(&config.solution_id) {
            None => false,
            Some(existing) if existing.is_default => {
                tracing::warn!(
                    id = %config.solution_id,
                    "Attempted to update default solution, ignoring"
                );
                false
            }
            Some(_) => {
                solutions.insert(config.solution_id.clone(), config);
                true
            }
        }
    }

    /// Delete a solution by ID
    ///
    /// Returns false if the solution does not exist or is a built-in
    /// default (defaults cannot be deleted).
    pub fn delete_solution(&self, solution_id: &str) -> bool {
        let Ok(mut solutions) = self.solutions.lock() else {
            return false;
        };

        match solutions.get(solution_id) {
            None => false,
            Some(existing) if existing.is_default => {
                tracing::warn!(
                    id = %solution_id,
                    "Attempted to delete default solution, ignoring"
                );
                false
            }
            Some(_) => {
                solutions.remove(solution_id);
                tracing::info!(id = %solution_id, "Deleted solution");
                true
            }
        }
    }

    /// Check whether a solution is a built-in default
    pub fn is_default_solution(&self, solution_id: &str) -> bool {
        self.solutions
            .lock()
            .map(|solutions| {
                solutions
                    .get(solution_id)
                    .map(|s| s.is_default)
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    /// Instantiate a solution into a resolved pipeline
    ///
    /// Fetches a value copy of the template, then resolves it against the
    /// caller-supplied parameters outside the lock. Substitution failures
    /// carry the node index and unresolved key for the upstream handler.
    pub fn instantiate(
        &self,
        solution_id: &str,
        request: &BTreeMap<String, String>,
        instance_id: Option<&str>,
    ) -> Result<ResolvedPipeline> {
        let config = self
            .get_solution(solution_id)
            .ok_or_else(|| Error::SolutionNotFound(solution_id.to_string()))?;

        config.instantiate(request, instance_id)
    }

    /// Get solution count
    pub fn len(&self) -> usize {
        self.solutions
            .lock()
            .map(|solutions| solutions.len())
            .unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SolutionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
