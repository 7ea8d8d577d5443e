use crate::request::ResourceRequest;
use crate::resources::{ResourceAmount, ResourceVector};

/// Round a requested capability to the scheduler's allocation granularity:
/// each dimension is rounded up to the nearest multiple of its increment that
/// is at least the minimum, then silently clamped to the maximum.
///
/// The minimum must itself be a multiple of the increment; the configuration
/// layer validates that (see [`crate::config::AllocationConfig::validate`]).
pub fn normalize(
    capability: &ResourceVector,
    minimum: &ResourceVector,
    maximum: &ResourceVector,
    increment: &ResourceVector,
) -> ResourceVector {
    capability
        .dimension_ids()
        .map(|id| {
            normalize_amount(
                capability.get(id),
                minimum.get(id),
                maximum.get(id),
                increment.get(id),
            )
        })
        .collect()
}

fn normalize_amount(
    value: ResourceAmount,
    minimum: ResourceAmount,
    maximum: ResourceAmount,
    increment: ResourceAmount,
) -> ResourceAmount {
    let rounded = if value <= minimum {
        minimum
    } else {
        debug_assert!(increment > ResourceAmount::ZERO);
        ResourceAmount::new(div_ceil(value.as_num(), increment.as_num()) * increment.as_num())
    };
    rounded.min(maximum)
}

// `i64::div_ceil` is still unstable (`int_roundings`, rust-lang/rust#88581);
// this mirrors its exact semantics for stable toolchains.
fn div_ceil(lhs: i64, rhs: i64) -> i64 {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > 0 && rhs > 0) || (r < 0 && rhs < 0) {
        d + 1
    } else {
        d
    }
}

/// Normalize a single ask in place, with the minimum doubling as the increment.
pub fn normalize_request(
    ask: &mut ResourceRequest,
    minimum: &ResourceVector,
    maximum: &ResourceVector,
) {
    normalize_request_with_increment(ask, minimum, maximum, minimum);
}

/// Normalize a single ask in place with an explicit allocation increment.
pub fn normalize_request_with_increment(
    ask: &mut ResourceRequest,
    minimum: &ResourceVector,
    maximum: &ResourceVector,
    increment: &ResourceVector,
) {
    let normalized = normalize(ask.capability(), minimum, maximum, increment);
    ask.set_capability(normalized);
}

/// Normalize a batch of asks in place; each element is transformed
/// independently.
pub fn normalize_requests(
    asks: &mut [ResourceRequest],
    minimum: &ResourceVector,
    maximum: &ResourceVector,
) {
    for ask in asks {
        normalize_request(ask, minimum, maximum);
    }
}

pub fn normalize_requests_with_increment(
    asks: &mut [ResourceRequest],
    minimum: &ResourceVector,
    maximum: &ResourceVector,
    increment: &ResourceVector,
) {
    for ask in asks {
        normalize_request_with_increment(ask, minimum, maximum, increment);
    }
}
