use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::common::utils::format_comma_delimited;
use crate::resources::{DimensionId, ResourceAmount, ResourceUnits};

/// A fixed-size vector of resource amounts, indexed by dimension id.
/// Dimensions not present in the vector read as zero.
#[derive(Default, Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct ResourceVector(SmallVec<[ResourceAmount; 2]>);

impl ResourceVector {
    pub fn new(mem: ResourceAmount, cpus: ResourceAmount) -> Self {
        ResourceVector(smallvec![mem, cpus])
    }

    pub fn from_units(units: &[ResourceUnits]) -> Self {
        units.iter().copied().map(ResourceAmount::new).collect()
    }

    pub fn zero(n_dimensions: usize) -> Self {
        ResourceVector(smallvec![ResourceAmount::ZERO; n_dimensions])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: DimensionId) -> ResourceAmount {
        self.0
            .get(index.as_num() as usize)
            .copied()
            .unwrap_or(ResourceAmount::ZERO)
    }

    #[inline]
    pub fn mem(&self) -> ResourceAmount {
        self.get(crate::resources::MEM_DIMENSION_ID)
    }

    #[inline]
    pub fn cpus(&self) -> ResourceAmount {
        self.get(crate::resources::CPU_DIMENSION_ID)
    }

    pub fn dimension_ids(&self) -> impl Iterator<Item = DimensionId> + '_ {
        (0..self.0.len() as u32).map(DimensionId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceAmount> + '_ {
        self.0.iter().copied()
    }

    /// Subtract `other` dimension-wise, clamping each dimension at zero.
    /// Returns true if any dimension was clamped.
    pub fn subtract_saturating(&mut self, other: &ResourceVector) -> bool {
        if self.0.len() < other.0.len() {
            self.0.resize(other.0.len(), ResourceAmount::ZERO);
        }
        let mut clamped = false;
        for (index, amount) in other.0.iter().enumerate() {
            if self.0[index] < *amount {
                self.0[index] = ResourceAmount::ZERO;
                clamped = true;
            } else {
                self.0[index] -= *amount;
            }
        }
        clamped
    }
}

impl std::ops::AddAssign<&ResourceVector> for ResourceVector {
    fn add_assign(&mut self, rhs: &ResourceVector) {
        if self.0.len() < rhs.0.len() {
            self.0.resize(rhs.0.len(), ResourceAmount::ZERO);
        }
        for (index, amount) in rhs.0.iter().enumerate() {
            self.0[index] += *amount;
        }
    }
}

impl FromIterator<ResourceAmount> for ResourceVector {
    fn from_iter<I: IntoIterator<Item = ResourceAmount>>(iter: I) -> Self {
        ResourceVector(iter.into_iter().collect())
    }
}

impl std::fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}]", format_comma_delimited(&self.0))
    }
}
