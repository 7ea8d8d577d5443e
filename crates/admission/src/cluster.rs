use crate::Set;
use crate::resources::DimensionMap;

/// The cluster-wide authority on which node labels exist.
pub trait LabelUniverse {
    fn contains_label(&self, label: &str) -> bool;
}

/// Snapshot universe over a plain label set.
impl LabelUniverse for Set<String> {
    fn contains_label(&self, label: &str) -> bool {
        self.contains(label)
    }
}

/// Cluster-wide context a validation call runs against. Carried explicitly
/// into each call; the admission layer holds no ambient state.
pub struct ClusterContext<'a> {
    pub node_labels_enabled: bool,
    pub label_universe: Option<&'a dyn LabelUniverse>,
    pub dimensions: DimensionMap,
}

impl<'a> ClusterContext<'a> {
    pub fn new(node_labels_enabled: bool) -> ClusterContext<'a> {
        ClusterContext {
            node_labels_enabled,
            label_universe: None,
            dimensions: DimensionMap::default(),
        }
    }

    pub fn with_label_universe(mut self, universe: &'a dyn LabelUniverse) -> Self {
        self.label_universe = Some(universe);
        self
    }

    pub fn with_dimensions(mut self, dimensions: DimensionMap) -> Self {
        self.dimensions = dimensions;
        self
    }
}
