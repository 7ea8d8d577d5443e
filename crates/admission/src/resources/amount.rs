use derive_more::{Add, AddAssign, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};

/// Raw units of one resource dimension (MiB of memory, number of cores).
/// Signed, because asks arrive from clients unvalidated and a negative value
/// has to survive long enough to be rejected with a proper diagnostic.
pub type ResourceUnits = i64;

#[derive(
    Debug,
    Default,
    Serialize,
    Clone,
    Copy,
    Hash,
    Eq,
    Deserialize,
    PartialEq,
    Ord,
    PartialOrd,
    AddAssign,
    SubAssign,
    Sub,
    Add,
    Sum,
)]
pub struct ResourceAmount(ResourceUnits);

impl ResourceAmount {
    pub const ZERO: ResourceAmount = ResourceAmount(0);

    pub fn new(units: ResourceUnits) -> Self {
        ResourceAmount(units)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn as_num(&self) -> ResourceUnits {
        self.0
    }
}

impl From<ResourceUnits> for ResourceAmount {
    fn from(units: ResourceUnits) -> Self {
        ResourceAmount(units)
    }
}

impl std::fmt::Display for ResourceAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
