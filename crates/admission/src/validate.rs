use thiserror::Error;

use crate::Set;
use crate::cluster::ClusterContext;
use crate::common::utils::format_comma_delimited;
use crate::labels::LabelExpression;
use crate::queue::{QueueLabelPolicy, QueuePolicyResolver};
use crate::request::ResourceRequest;
use crate::resources::{ResourceAmount, ResourceVector};

/// Why a resource request was refused admission. Every variant carries the
/// context needed for a precise user-facing diagnostic; none of them is
/// retried by this layer.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum InvalidResourceRequest {
    #[error(
        "Invalid resource request, requested {dimension} < 0 or requested {dimension} > max configured, requested={requested}, maximum={maximum}"
    )]
    BoundsViolation {
        dimension: String,
        requested: ResourceAmount,
        maximum: ResourceAmount,
    },

    #[error(
        "Invalid resource request, node labels are not enabled in the cluster, but the request contains the label expression '{expression}'"
    )]
    LabelNotEnabled { expression: String },

    #[error(
        "Invalid resource request, queue={queue} specified a node label expression in a request with resource name = {resource_name}"
    )]
    LabelOnSpecificResource { queue: String, resource_name: String },

    #[error(
        "Invalid resource request, queue={queue} specified more than one node label in a node label expression, node label expression = {expression}"
    )]
    MultipleLabels { queue: String, expression: String },

    #[error(
        "Invalid resource request, queue={queue} doesn't have permission to access all labels in the request, label expression = {expression}, queue labels = {queue_labels}"
    )]
    LabelAccessDenied {
        queue: String,
        expression: String,
        queue_labels: String,
    },

    #[error("Invalid resource request, the cluster does not contain the label '{label}'")]
    UnknownLabel { label: String },
}

/// Fill in a missing node label expression: a wildcard request adopts the
/// queue's default expression when one exists, anything else falls back to no
/// restriction. A no-op on requests that already carry an expression.
pub fn resolve_node_label_expression(
    request: &mut ResourceRequest,
    queue_policy: Option<&QueueLabelPolicy>,
) {
    if request.node_label_expression().is_some() {
        return;
    }
    let expression = queue_policy
        .filter(|_| request.resource_name().is_any())
        .and_then(|policy| policy.default_node_label_expression().cloned())
        .unwrap_or(LabelExpression::Unrestricted);
    request.set_node_label_expression(expression);
}

/// Admission entry point: resolve the request's label expression and check it
/// together with the capability bounds against queue and cluster policy.
///
/// A recovery replay (`is_recovery`) still resolves the expression but skips
/// every check; the request was already validated when first admitted.
/// When the caller does not pass a `queue_policy`, it is looked up through
/// `resolver`; an unresolvable queue degrades to validation without a policy.
pub fn normalize_and_validate_request(
    request: &mut ResourceRequest,
    maximum: &ResourceVector,
    queue_name: &str,
    resolver: &dyn QueuePolicyResolver,
    is_recovery: bool,
    cluster: &ClusterContext,
    queue_policy: Option<&QueueLabelPolicy>,
) -> Result<(), InvalidResourceRequest> {
    if !cluster.node_labels_enabled {
        if let Some(expression) = request.node_label_expression() {
            if !expression.is_unrestricted() {
                log::warn!(
                    "Node labels are not enabled in the cluster, but a resource request contains the label expression '{expression}'"
                );
                if !is_recovery {
                    return Err(InvalidResourceRequest::LabelNotEnabled {
                        expression: expression.to_string(),
                    });
                }
            }
        }
    }

    let looked_up;
    let queue_policy = match queue_policy {
        Some(policy) => Some(policy),
        None => {
            looked_up = resolver.queue_policy(queue_name);
            if looked_up.is_none() {
                log::debug!("No label policy available for queue {queue_name}");
            }
            looked_up.as_ref()
        }
    };

    resolve_node_label_expression(request, queue_policy);

    if is_recovery {
        return Ok(());
    }
    validate_resource_request(request, maximum, queue_name, queue_policy, cluster)
}

fn validate_resource_request(
    request: &ResourceRequest,
    maximum: &ResourceVector,
    queue_name: &str,
    queue_policy: Option<&QueueLabelPolicy>,
    cluster: &ClusterContext,
) -> Result<(), InvalidResourceRequest> {
    let capability = request.capability();
    for id in capability.dimension_ids() {
        let requested = capability.get(id);
        let limit = maximum.get(id);
        if requested < ResourceAmount::ZERO || requested > limit {
            return Err(InvalidResourceRequest::BoundsViolation {
                dimension: cluster.dimensions.name_of(id),
                requested,
                maximum: limit,
            });
        }
    }

    let expression = match request.node_label_expression() {
        Some(expression) if !expression.is_unrestricted() => expression,
        // Resolution has run by now, so this only leaves unrestricted requests
        _ => return Ok(()),
    };

    // Label expressions are only allowed on the wildcard aggregate request
    if !request.resource_name().is_any() {
        return Err(InvalidResourceRequest::LabelOnSpecificResource {
            queue: queue_name.to_string(),
            resource_name: request.resource_name().to_string(),
        });
    }

    // Multi-label conjunctions are not admitted yet
    if expression.is_conjunction() {
        return Err(InvalidResourceRequest::MultipleLabels {
            queue: queue_name.to_string(),
            expression: expression.to_string(),
        });
    }

    if let Some(policy) = queue_policy {
        if !expression.matches_queue(policy.accessible_node_labels()) {
            return Err(InvalidResourceRequest::LabelAccessDenied {
                queue: policy.queue_name().to_string(),
                expression: expression.to_string(),
                queue_labels: policy
                    .accessible_node_labels()
                    .map(|labels| format_comma_delimited(labels))
                    .unwrap_or_default(),
            });
        }
        if let Some(universe) = cluster.label_universe {
            for atom in expression.atoms() {
                if !universe.contains_label(atom) {
                    return Err(InvalidResourceRequest::UnknownLabel {
                        label: atom.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Standalone queue label check: does the expression stay within
/// `queue_labels`, and, when the context knows the label universe, do all its
/// atoms exist cluster-wide?
pub fn check_queue_label_expression(
    queue_labels: Option<&Set<String>>,
    expression: &LabelExpression,
    cluster: Option<&ClusterContext>,
) -> bool {
    if !expression.matches_queue(queue_labels) {
        return false;
    }
    match cluster.and_then(|context| context.label_universe) {
        Some(universe) => expression
            .atoms()
            .iter()
            .all(|atom| universe.contains_label(atom)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Map;
    use crate::labels::ANY;
    use crate::tests::ReqBuilder;

    fn maximum() -> ResourceVector {
        ResourceVector::from_units(&[8192, 8])
    }

    fn no_policies() -> Map<String, QueueLabelPolicy> {
        Map::default()
    }

    fn gpu_policy() -> QueueLabelPolicy {
        QueueLabelPolicy::new("prod").with_accessible_labels(["gpu"])
    }

    fn labels(names: &[&str]) -> Set<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn validate(
        request: &mut ResourceRequest,
        cluster: &ClusterContext,
        policy: Option<&QueueLabelPolicy>,
    ) -> Result<(), InvalidResourceRequest> {
        normalize_and_validate_request(
            request,
            &maximum(),
            "prod",
            &no_policies(),
            false,
            cluster,
            policy,
        )
    }

    #[test]
    fn test_resolution_wildcard_adopts_queue_default() {
        let policy =
            QueueLabelPolicy::new("prod").with_default_expression(LabelExpression::label("gpu"));
        let mut request = ReqBuilder::default().finish();
        resolve_node_label_expression(&mut request, Some(&policy));
        assert_eq!(
            request.node_label_expression(),
            Some(&LabelExpression::label("gpu"))
        );
    }

    #[test]
    fn test_resolution_specific_name_ignores_queue_default() {
        let policy =
            QueueLabelPolicy::new("prod").with_default_expression(LabelExpression::label("gpu"));
        let mut request = ReqBuilder::default().host("host1").finish();
        resolve_node_label_expression(&mut request, Some(&policy));
        assert_eq!(
            request.node_label_expression(),
            Some(&LabelExpression::Unrestricted)
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let policy =
            QueueLabelPolicy::new("prod").with_default_expression(LabelExpression::label("gpu"));
        let mut request = ReqBuilder::default().label("fast").finish();
        resolve_node_label_expression(&mut request, Some(&policy));
        assert_eq!(
            request.node_label_expression(),
            Some(&LabelExpression::label("fast"))
        );
    }

    #[test]
    fn test_valid_request_passes() {
        let cluster = ClusterContext::new(true);
        let policy = gpu_policy();
        let mut request = ReqBuilder::default().mem(1024).cpus(1).label("gpu").finish();
        assert!(validate(&mut request, &cluster, Some(&policy)).is_ok());
    }

    #[test]
    fn test_bounds_negative_dimension() {
        let cluster = ClusterContext::new(true);
        let mut request = ReqBuilder::default().mem(-1).cpus(1).finish();
        let error = validate(&mut request, &cluster, None).unwrap_err();
        assert_eq!(
            error,
            InvalidResourceRequest::BoundsViolation {
                dimension: "mem".to_string(),
                requested: ResourceAmount::new(-1),
                maximum: ResourceAmount::new(8192),
            }
        );
    }

    #[test]
    fn test_bounds_above_maximum() {
        let cluster = ClusterContext::new(true);
        let mut request = ReqBuilder::default().mem(1024).cpus(100).finish();
        let error = validate(&mut request, &cluster, None).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::BoundsViolation { dimension, .. } if dimension == "cpus"
        ));
    }

    #[test]
    fn test_label_on_specific_resource_name_rejected() {
        let cluster = ClusterContext::new(true);
        // Even full label access does not allow this
        let policy = QueueLabelPolicy::new("prod").with_accessible_labels([ANY]);
        let mut request = ReqBuilder::default().host("host1").label("gpu").finish();
        let error = validate(&mut request, &cluster, Some(&policy)).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::LabelOnSpecificResource { resource_name, .. }
                if resource_name == "host1"
        ));
    }

    #[test]
    fn test_conjunction_rejected() {
        let cluster = ClusterContext::new(true);
        let policy = QueueLabelPolicy::new("prod").with_accessible_labels([ANY]);
        let mut request = ReqBuilder::default().label("x&&y").finish();
        let error = validate(&mut request, &cluster, Some(&policy)).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::MultipleLabels { expression, .. } if expression == "x&&y"
        ));
    }

    #[test]
    fn test_queue_without_access_rejected() {
        let cluster = ClusterContext::new(true);
        let policy = gpu_policy();
        let mut request = ReqBuilder::default().label("fpga").finish();
        let error = validate(&mut request, &cluster, Some(&policy)).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::LabelAccessDenied { expression, .. } if expression == "fpga"
        ));
    }

    #[test]
    fn test_queue_without_any_labels_rejected() {
        let cluster = ClusterContext::new(true);
        let policy = QueueLabelPolicy::new("prod");
        let mut request = ReqBuilder::default().label("gpu").finish();
        let error = validate(&mut request, &cluster, Some(&policy)).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::LabelAccessDenied { .. }
        ));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let universe = labels(&["fast"]);
        let cluster = ClusterContext::new(true).with_label_universe(&universe);
        let policy = QueueLabelPolicy::new("prod").with_accessible_labels(["gpu"]);
        let mut request = ReqBuilder::default().label("gpu").finish();
        let error = validate(&mut request, &cluster, Some(&policy)).unwrap_err();
        assert_eq!(
            error,
            InvalidResourceRequest::UnknownLabel {
                label: "gpu".to_string()
            }
        );
    }

    #[test]
    fn test_label_known_in_universe_passes() {
        let universe = labels(&["gpu"]);
        let cluster = ClusterContext::new(true).with_label_universe(&universe);
        let mut request = ReqBuilder::default().label("gpu").finish();
        assert!(validate(&mut request, &cluster, Some(&gpu_policy())).is_ok());
    }

    #[test]
    fn test_labels_disabled_rejects_expression() {
        let cluster = ClusterContext::new(false);
        let mut request = ReqBuilder::default().label("gpu").finish();
        let error = validate(&mut request, &cluster, None).unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::LabelNotEnabled { expression } if expression == "gpu"
        ));
    }

    #[test]
    fn test_labels_disabled_recovery_is_trusted() {
        let cluster = ClusterContext::new(false);
        let mut request = ReqBuilder::default().label("gpu").finish();
        let result = normalize_and_validate_request(
            &mut request,
            &maximum(),
            "prod",
            &no_policies(),
            true,
            &cluster,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_recovery_skips_all_checks_but_still_resolves() {
        let cluster = ClusterContext::new(true);
        // Out of bounds and labeled on a specific name; recovery admits it anyway
        let mut request = ReqBuilder::default().host("host1").mem(100_000).finish();
        let result = normalize_and_validate_request(
            &mut request,
            &maximum(),
            "prod",
            &no_policies(),
            true,
            &cluster,
            None,
        );
        assert!(result.is_ok());
        assert_eq!(
            request.node_label_expression(),
            Some(&LabelExpression::Unrestricted)
        );
    }

    #[test]
    fn test_policy_looked_up_through_resolver() {
        let cluster = ClusterContext::new(true);
        let mut policies = no_policies();
        policies.insert("prod".to_string(), gpu_policy());
        let mut request = ReqBuilder::default().label("fpga").finish();
        let error = normalize_and_validate_request(
            &mut request,
            &maximum(),
            "prod",
            &policies,
            false,
            &cluster,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            InvalidResourceRequest::LabelAccessDenied { queue, .. } if queue == "prod"
        ));
    }

    #[test]
    fn test_unresolvable_queue_degrades_to_no_policy() {
        let cluster = ClusterContext::new(true);
        // No policy anywhere: bounds are still enforced, label access is not
        let mut request = ReqBuilder::default().label("gpu").finish();
        assert!(validate(&mut request, &cluster, None).is_ok());
    }

    #[test]
    fn test_check_queue_label_expression() {
        let gpu = labels(&["gpu"]);
        let any = labels(&[ANY]);
        let expression = LabelExpression::label("gpu");

        assert!(check_queue_label_expression(
            Some(&gpu),
            &expression,
            None
        ));
        assert!(!check_queue_label_expression(
            Some(&gpu),
            &LabelExpression::label("cpu"),
            None
        ));
        assert!(check_queue_label_expression(
            Some(&any),
            &expression,
            None
        ));
        assert!(!check_queue_label_expression(None, &expression, None));
        assert!(check_queue_label_expression(
            None,
            &LabelExpression::Unrestricted,
            None
        ));
    }

    #[test]
    fn test_check_queue_label_expression_consults_universe() {
        let universe = labels(&["fast"]);
        let cluster = ClusterContext::new(true).with_label_universe(&universe);
        let any = labels(&[ANY]);

        assert!(!check_queue_label_expression(
            Some(&any),
            &LabelExpression::label("gpu"),
            Some(&cluster)
        ));
        assert!(check_queue_label_expression(
            Some(&any),
            &LabelExpression::label("fast"),
            Some(&cluster)
        ));
    }
}
