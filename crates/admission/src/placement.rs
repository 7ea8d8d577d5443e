use serde::{Deserialize, Serialize};

use crate::labels::NO_LABEL;
use crate::resources::{ResourceCalculator, ResourceVector, greater_than};
use crate::usage::ResourceUsage;

/// Whether a scheduling pass honors node partitions or deliberately treats
/// every node as unlabeled (e.g. to avoid starving unlabeled demand).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum SchedulingMode {
    RespectPartitionExclusivity,
    IgnorePartitionExclusivity,
}

/// Does a request's desired partition allow placement on a node of
/// `node_partition` under the given mode?
///
/// Under `IgnorePartitionExclusivity` the node's real partition is
/// disregarded entirely, so only requests asking for the unlabeled partition
/// match. Comparison is exact; wildcard handling happened during validation.
pub fn check_request_matches_node_partition(
    requested_partition: Option<&str>,
    node_partition: &str,
    mode: SchedulingMode,
) -> bool {
    let node_partition_to_look_at = match mode {
        SchedulingMode::RespectPartitionExclusivity => node_partition,
        SchedulingMode::IgnorePartitionExclusivity => NO_LABEL,
    };
    requested_partition.unwrap_or(NO_LABEL) == node_partition_to_look_at
}

/// Is there outstanding demand for the partition a pass over `node_partition`
/// would serve? Consulted once per node and partition on the scheduling hot
/// path.
pub fn has_pending_resource_request(
    calculator: &dyn ResourceCalculator,
    usage: &ResourceUsage,
    node_partition: &str,
    cluster: &ResourceVector,
    mode: SchedulingMode,
) -> bool {
    let partition_to_look_at = match mode {
        SchedulingMode::RespectPartitionExclusivity => node_partition,
        SchedulingMode::IgnorePartitionExclusivity => NO_LABEL,
    };
    let pending = usage.pending(partition_to_look_at);
    greater_than(
        calculator,
        cluster,
        &pending,
        &ResourceVector::zero(pending.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::SchedulingMode::{IgnorePartitionExclusivity, RespectPartitionExclusivity};
    use crate::resources::PerDimensionCalculator;

    #[test]
    fn test_matching_respect_mode() {
        assert!(check_request_matches_node_partition(
            Some("gpu"),
            "gpu",
            RespectPartitionExclusivity
        ));
        assert!(!check_request_matches_node_partition(
            Some("gpu"),
            "cpu",
            RespectPartitionExclusivity
        ));
        assert!(check_request_matches_node_partition(
            None,
            NO_LABEL,
            RespectPartitionExclusivity
        ));
        assert!(!check_request_matches_node_partition(
            None,
            "gpu",
            RespectPartitionExclusivity
        ));
    }

    #[test]
    fn test_matching_ignore_mode() {
        // The node's real partition is disregarded
        assert!(check_request_matches_node_partition(
            None,
            "gpu",
            IgnorePartitionExclusivity
        ));
        assert!(check_request_matches_node_partition(
            Some(NO_LABEL),
            "gpu",
            IgnorePartitionExclusivity
        ));
        // A labeled request still does not match under ignore
        assert!(!check_request_matches_node_partition(
            Some("gpu"),
            "gpu",
            IgnorePartitionExclusivity
        ));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!check_request_matches_node_partition(
            Some("GPU"),
            "gpu",
            RespectPartitionExclusivity
        ));
    }

    #[test]
    fn test_pending_demand() {
        let rc = PerDimensionCalculator;
        let cluster = ResourceVector::from_units(&[16384, 16]);
        let mut usage = ResourceUsage::default();
        usage.incr_pending("gpu", &ResourceVector::from_units(&[4096, 4]));

        assert!(has_pending_resource_request(
            &rc,
            &usage,
            "gpu",
            &cluster,
            RespectPartitionExclusivity
        ));
        assert!(!has_pending_resource_request(
            &rc,
            &usage,
            "cpu",
            &cluster,
            RespectPartitionExclusivity
        ));
        // Ignore mode looks at the unlabeled partition, which has no demand
        assert!(!has_pending_resource_request(
            &rc,
            &usage,
            "gpu",
            &cluster,
            IgnorePartitionExclusivity
        ));

        usage.incr_pending(NO_LABEL, &ResourceVector::from_units(&[1024, 1]));
        assert!(has_pending_resource_request(
            &rc,
            &usage,
            "gpu",
            &cluster,
            IgnorePartitionExclusivity
        ));
    }
}
