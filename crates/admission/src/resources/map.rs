use crate::resources::DimensionId;

pub const MEM_DIMENSION_ID: DimensionId = DimensionId(0);
pub const CPU_DIMENSION_ID: DimensionId = DimensionId(1);

pub const MEM_DIMENSION_NAME: &str = "mem";
pub const CPU_DIMENSION_NAME: &str = "cpus";

/// Immutable snapshot of the dimension names configured for a cluster.
/// Indices of `dimension_names` are the dimension ids.
#[derive(Debug, Clone)]
pub struct DimensionMap {
    dimension_names: Vec<String>,
}

impl Default for DimensionMap {
    fn default() -> Self {
        DimensionMap {
            dimension_names: vec![
                MEM_DIMENSION_NAME.to_string(),
                CPU_DIMENSION_NAME.to_string(),
            ],
        }
    }
}

impl DimensionMap {
    #[inline]
    pub fn from_vec(dimension_names: Vec<String>) -> Self {
        Self { dimension_names }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dimension_names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimension_names.is_empty()
    }

    #[inline]
    pub fn get_index(&self, name: &str) -> Option<DimensionId> {
        self.dimension_names
            .iter()
            .position(|n| n == name)
            .map(|id| DimensionId::new(id as u32))
    }

    #[inline]
    pub fn get_name(&self, index: DimensionId) -> Option<&str> {
        self.dimension_names
            .get(index.as_num() as usize)
            .map(|s| s.as_str())
    }

    /// Display name of a dimension, also for ids this map does not know.
    pub fn name_of(&self, index: DimensionId) -> String {
        self.get_name(index)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("dimension {index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let map = DimensionMap::default();
        assert_eq!(map.get_index(MEM_DIMENSION_NAME), Some(MEM_DIMENSION_ID));
        assert_eq!(map.get_index(CPU_DIMENSION_NAME), Some(CPU_DIMENSION_ID));
        assert_eq!(map.get_name(CPU_DIMENSION_ID), Some(CPU_DIMENSION_NAME));
        assert_eq!(map.get_index("gpus"), None);
    }

    #[test]
    fn test_name_of_unknown_dimension() {
        let map = DimensionMap::default();
        assert_eq!(map.name_of(MEM_DIMENSION_ID), "mem");
        assert_eq!(map.name_of(DimensionId::new(7)), "dimension 7");
    }

    #[test]
    fn test_extended_dimensions() {
        let map = DimensionMap::from_vec(vec![
            "mem".to_string(),
            "cpus".to_string(),
            "gpus".to_string(),
        ]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_index("gpus"), Some(DimensionId::new(2)));
        assert_eq!(map.name_of(DimensionId::new(2)), "gpus");
    }
}
