use serde::{Deserialize, Serialize};

use crate::Priority;
use crate::labels::LabelExpression;
use crate::resources::ResourceVector;

/// Placement target of a resource request.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub enum ResourceName {
    /// The aggregate ask, not bound to a specific host or rack.
    Any,
    /// A specific host or rack identifier.
    Specific(String),
}

impl ResourceName {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, ResourceName::Any)
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResourceName::Any => write!(f, "*"),
            ResourceName::Specific(name) => write!(f, "{name}"),
        }
    }
}

/// A single resource ask as submitted by an application.
///
/// Only the admission pipeline writes to a request: normalization replaces
/// the capability and label resolution fills in the label expression. After
/// that the request is read-only for the scheduling passes.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct ResourceRequest {
    priority: Priority,
    resource_name: ResourceName,
    capability: ResourceVector,
    num_containers: u32,
    node_label_expression: Option<LabelExpression>,
}

impl ResourceRequest {
    pub fn new(
        priority: Priority,
        resource_name: ResourceName,
        capability: ResourceVector,
        num_containers: u32,
    ) -> ResourceRequest {
        ResourceRequest {
            priority,
            resource_name,
            capability,
            num_containers,
            node_label_expression: None,
        }
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn resource_name(&self) -> &ResourceName {
        &self.resource_name
    }

    #[inline]
    pub fn capability(&self) -> &ResourceVector {
        &self.capability
    }

    #[inline]
    pub fn num_containers(&self) -> u32 {
        self.num_containers
    }

    #[inline]
    pub fn node_label_expression(&self) -> Option<&LabelExpression> {
        self.node_label_expression.as_ref()
    }

    pub fn set_capability(&mut self, capability: ResourceVector) {
        self.capability = capability;
    }

    pub fn set_node_label_expression(&mut self, expression: LabelExpression) {
        self.node_label_expression = Some(expression);
    }

    /// The partition this request asks for, once the label expression has
    /// been resolved. `None` stands for the unlabeled partition.
    pub fn requested_partition(&self) -> Option<&str> {
        match &self.node_label_expression {
            Some(LabelExpression::Atoms(atoms)) => atoms.first().map(String::as_str),
            _ => None,
        }
    }
}
