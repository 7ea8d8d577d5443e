use serde::{Deserialize, Serialize};

use crate::labels::LabelExpression;
use crate::{Map, Set};

/// Label policy of one queue: which node labels its requests may target and
/// the default expression adopted by wildcard requests that specify none.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct QueueLabelPolicy {
    queue_name: String,
    /// `None` means the queue has no label access at all; the set may contain
    /// the [`crate::labels::ANY`] wildcard.
    accessible_node_labels: Option<Set<String>>,
    default_node_label_expression: Option<LabelExpression>,
}

impl QueueLabelPolicy {
    pub fn new(queue_name: impl Into<String>) -> QueueLabelPolicy {
        QueueLabelPolicy {
            queue_name: queue_name.into(),
            accessible_node_labels: None,
            default_node_label_expression: None,
        }
    }

    pub fn with_accessible_labels<T: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = T>,
    ) -> Self {
        self.accessible_node_labels = Some(labels.into_iter().map(|label| label.into()).collect());
        self
    }

    pub fn with_default_expression(mut self, expression: LabelExpression) -> Self {
        self.default_node_label_expression = Some(expression);
        self
    }

    #[inline]
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    #[inline]
    pub fn accessible_node_labels(&self) -> Option<&Set<String>> {
        self.accessible_node_labels.as_ref()
    }

    #[inline]
    pub fn default_node_label_expression(&self) -> Option<&LabelExpression> {
        self.default_node_label_expression.as_ref()
    }
}

/// Resolves a queue name to its label policy. A queue can be temporarily
/// unresolvable (e.g. while a queue mapping is being applied); that is
/// reported as `None`, not as an error, and validation proceeds without a
/// policy.
pub trait QueuePolicyResolver {
    fn queue_policy(&self, queue_name: &str) -> Option<QueueLabelPolicy>;
}

/// Snapshot-based resolver over a plain map of queue policies.
impl QueuePolicyResolver for Map<String, QueueLabelPolicy> {
    fn queue_policy(&self, queue_name: &str) -> Option<QueueLabelPolicy> {
        self.get(queue_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_resolver() {
        let mut policies: Map<String, QueueLabelPolicy> = Map::default();
        policies.insert(
            "prod".to_string(),
            QueueLabelPolicy::new("prod").with_accessible_labels(["gpu"]),
        );

        let found = policies.queue_policy("prod").unwrap();
        assert_eq!(found.queue_name(), "prod");
        assert!(found.accessible_node_labels().unwrap().contains("gpu"));
        assert!(policies.queue_policy("missing").is_none());
    }
}
