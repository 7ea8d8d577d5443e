use serde::{Deserialize, Serialize};

use crate::resources::{DimensionMap, ResourceAmount, ResourceVector};

/// Allocation sizing limits of the scheduler, loaded from the cluster
/// configuration. Normalization relies on the invariants `validate` enforces,
/// in particular that the minimum is a multiple of the increment.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AllocationConfig {
    pub minimum: ResourceVector,
    pub maximum: ResourceVector,
    /// Allocation granularity; the minimum is used when not set.
    #[serde(default)]
    pub increment: Option<ResourceVector>,
    #[serde(default)]
    pub node_labels_enabled: bool,
}

impl AllocationConfig {
    pub fn new(minimum: ResourceVector, maximum: ResourceVector) -> AllocationConfig {
        AllocationConfig {
            minimum,
            maximum,
            increment: None,
            node_labels_enabled: false,
        }
    }

    pub fn effective_increment(&self) -> &ResourceVector {
        self.increment.as_ref().unwrap_or(&self.minimum)
    }

    pub fn validate(&self, dimensions: &DimensionMap) -> crate::Result<()> {
        if self.minimum.len() != self.maximum.len() {
            return Err(format!(
                "Allocation minimum has {} dimensions but maximum has {}",
                self.minimum.len(),
                self.maximum.len()
            )
            .into());
        }
        if let Some(increment) = &self.increment {
            if increment.len() != self.minimum.len() {
                return Err(format!(
                    "Allocation increment has {} dimensions but minimum has {}",
                    increment.len(),
                    self.minimum.len()
                )
                .into());
            }
        }
        for id in self.minimum.dimension_ids() {
            let name = dimensions.name_of(id);
            let minimum = self.minimum.get(id);
            let maximum = self.maximum.get(id);
            let increment = self.effective_increment().get(id);

            if minimum < ResourceAmount::ZERO {
                return Err(format!("Allocation minimum of {name} is negative: {minimum}").into());
            }
            if maximum < minimum {
                return Err(format!(
                    "Allocation maximum of {name} ({maximum}) is below the minimum ({minimum})"
                )
                .into());
            }
            if increment <= ResourceAmount::ZERO {
                return Err(format!(
                    "Allocation increment of {name} must be positive, got {increment}"
                )
                .into());
            }
            if minimum.as_num() % increment.as_num() != 0 {
                return Err(format!(
                    "Allocation minimum of {name} ({minimum}) is not a multiple of the increment ({increment})"
                )
                .into());
            }
        }
        Ok(())
    }
}
