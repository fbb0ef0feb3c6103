//! Read-only registry of loaded model handles.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::InferError;

use super::{Model, ModelVariant, OnnxModel};

/// Mapping from variant to trained-model handle.
///
/// Built once at startup and shared read-only by every request, so no locking
/// is needed. The map is total over [`ModelVariant`] by construction; the
/// fallible step is parsing the wire string, not the lookup.
pub struct ModelRegistry {
    models: HashMap<ModelVariant, Arc<dyn Model>>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry").finish_non_exhaustive()
    }
}

impl ModelRegistry {
    /// Load every variant's artifact from `models_dir`. A single failure
    /// aborts the whole load; the registry is never partial.
    pub fn load(models_dir: &Path) -> Result<Self, InferError> {
        let mut models: HashMap<ModelVariant, Arc<dyn Model>> = HashMap::new();
        for variant in ModelVariant::ALL {
            let path = models_dir.join(variant.artifact());
            let model = OnnxModel::load(&path)?;
            models.insert(variant, Arc::new(model));
        }
        info!(count = models.len(), dir = %models_dir.display(), "model registry ready");
        Ok(Self { models })
    }

    /// Build a registry from explicit handles, one per variant. Tests use
    /// this to substitute stub models.
    pub fn from_fn<F>(mut handle_for: F) -> Self
    where
        F: FnMut(ModelVariant) -> Arc<dyn Model>,
    {
        let models = ModelVariant::ALL
            .into_iter()
            .map(|variant| (variant, handle_for(variant)))
            .collect();
        Self { models }
    }

    pub fn get(&self, variant: ModelVariant) -> Arc<dyn Model> {
        Arc::clone(&self.models[&variant])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    struct FixedScore(f32);

    impl Model for FixedScore {
        fn predict(&self, _input: &Array3<f32>) -> Result<Vec<f32>, InferError> {
            Ok(vec![self.0])
        }
    }

    #[test]
    fn test_load_from_empty_dir_is_fatal() {
        let dir = std::env::temp_dir().join("shm-infer-empty-models");
        std::fs::create_dir_all(&dir).unwrap();
        let err = ModelRegistry::load(&dir).unwrap_err();
        assert!(matches!(err, InferError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_registry_is_total_over_variants() {
        let registry = ModelRegistry::from_fn(|_| Arc::new(FixedScore(0.7)));
        let input = Array3::zeros((1, 20, 80));
        for variant in ModelVariant::ALL {
            let output = registry.get(variant).predict(&input).unwrap();
            assert_eq!(output, vec![0.7]);
        }
    }
}
