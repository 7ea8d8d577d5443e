pub mod amount;
pub mod compare;
pub mod map;
pub mod normalize;
pub mod vector;

pub use amount::{ResourceAmount, ResourceUnits};
pub use compare::{
    DominantResourceCalculator, PerDimensionCalculator, ResourceCalculator, greater_than,
};
pub use map::{
    CPU_DIMENSION_ID, CPU_DIMENSION_NAME, DimensionMap, MEM_DIMENSION_ID, MEM_DIMENSION_NAME,
};
pub use normalize::{
    normalize, normalize_request, normalize_request_with_increment, normalize_requests,
    normalize_requests_with_increment,
};
pub use vector::ResourceVector;

// Identifies one dimension (memory, cores, ...) of a resource vector.
define_id_type!(DimensionId, u32);
