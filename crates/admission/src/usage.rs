use serde::{Deserialize, Serialize};

use crate::Map;
use crate::resources::ResourceVector;

/// Per-partition pending/used demand accounting of an application or queue,
/// keyed by partition name. Partitions never touched read as zero.
#[derive(Default, Serialize, Deserialize, Debug, Clone)]
pub struct ResourceUsage {
    partitions: Map<String, PartitionUsage>,
}

#[derive(Default, Serialize, Deserialize, Debug, Clone)]
struct PartitionUsage {
    pending: ResourceVector,
    used: ResourceVector,
}

impl ResourceUsage {
    pub fn pending(&self, partition: &str) -> ResourceVector {
        self.partitions
            .get(partition)
            .map(|usage| usage.pending.clone())
            .unwrap_or_default()
    }

    pub fn used(&self, partition: &str) -> ResourceVector {
        self.partitions
            .get(partition)
            .map(|usage| usage.used.clone())
            .unwrap_or_default()
    }

    pub fn incr_pending(&mut self, partition: &str, delta: &ResourceVector) {
        let usage = self.partition_mut(partition);
        usage.pending += delta;
    }

    pub fn decr_pending(&mut self, partition: &str, delta: &ResourceVector) {
        let usage = self.partition_mut(partition);
        if usage.pending.subtract_saturating(delta) {
            log::warn!("Pending resources of partition '{partition}' dropped below zero; clamped");
        }
    }

    pub fn incr_used(&mut self, partition: &str, delta: &ResourceVector) {
        let usage = self.partition_mut(partition);
        usage.used += delta;
    }

    pub fn decr_used(&mut self, partition: &str, delta: &ResourceVector) {
        let usage = self.partition_mut(partition);
        if usage.used.subtract_saturating(delta) {
            log::warn!("Used resources of partition '{partition}' dropped below zero; clamped");
        }
    }

    fn partition_mut(&mut self, partition: &str) -> &mut PartitionUsage {
        self.partitions.entry(partition.to_string()).or_default()
    }
}
