use std::cmp::Ordering;

use crate::resources::{DimensionId, ResourceVector};

/// Strategy for ordering two resource vectors in the context of the total
/// cluster capacity.
pub trait ResourceCalculator {
    fn compare(
        &self,
        cluster: &ResourceVector,
        lhs: &ResourceVector,
        rhs: &ResourceVector,
    ) -> Ordering;
}

/// Dimension-wise partial order: greater iff some dimension is greater and
/// none is lesser. Vectors that dominate in one dimension and lose in another
/// compare as equal.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerDimensionCalculator;

impl ResourceCalculator for PerDimensionCalculator {
    fn compare(
        &self,
        _cluster: &ResourceVector,
        lhs: &ResourceVector,
        rhs: &ResourceVector,
    ) -> Ordering {
        let mut greater = false;
        let mut lesser = false;
        for index in 0..lhs.len().max(rhs.len()) {
            let id = DimensionId::new(index as u32);
            match lhs.get(id).cmp(&rhs.get(id)) {
                Ordering::Greater => greater = true,
                Ordering::Less => lesser = true,
                Ordering::Equal => {}
            }
        }
        match (greater, lesser) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

/// Orders vectors by their dominant share of the cluster capacity.
#[derive(Debug, Default, Clone, Copy)]
pub struct DominantResourceCalculator;

impl DominantResourceCalculator {
    fn dominant_share(cluster: &ResourceVector, vector: &ResourceVector) -> f64 {
        let mut share = f64::MIN;
        for id in vector.dimension_ids() {
            let value = vector.get(id).as_num() as f64;
            let total = cluster.get(id).as_num() as f64;
            // A dimension the cluster does not provide contributes its raw value.
            let dimension_share = if total > 0.0 { value / total } else { value };
            share = share.max(dimension_share);
        }
        if share == f64::MIN { 0.0 } else { share }
    }
}

impl ResourceCalculator for DominantResourceCalculator {
    fn compare(
        &self,
        cluster: &ResourceVector,
        lhs: &ResourceVector,
        rhs: &ResourceVector,
    ) -> Ordering {
        let lhs_share = Self::dominant_share(cluster, lhs);
        let rhs_share = Self::dominant_share(cluster, rhs);
        lhs_share.total_cmp(&rhs_share)
    }
}

pub fn greater_than(
    calculator: &dyn ResourceCalculator,
    cluster: &ResourceVector,
    lhs: &ResourceVector,
    rhs: &ResourceVector,
) -> bool {
    calculator.compare(cluster, lhs, rhs) == Ordering::Greater
}
