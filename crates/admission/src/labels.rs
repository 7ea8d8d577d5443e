use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Set;

/// Partition name of nodes that carry no label.
pub const NO_LABEL: &str = "";

/// Wildcard entry of a queue's accessible label set; grants access to every
/// label.
pub const ANY: &str = "*";

const CONJUNCTION: &str = "&&";

/// A node label expression attached to a resource request: either no
/// restriction at all, or one-or-more label atoms joined by `&&`.
///
/// Admission currently rejects expressions with more than one atom, but the
/// representation and the queue matching already handle the general form.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub enum LabelExpression {
    Unrestricted,
    Atoms(SmallVec<[String; 1]>),
}

impl LabelExpression {
    /// Parse a raw expression. Atoms are trimmed; empty atoms are dropped, so
    /// a blank expression parses as [`LabelExpression::Unrestricted`].
    pub fn parse(raw: &str) -> LabelExpression {
        let atoms: SmallVec<[String; 1]> = raw
            .split(CONJUNCTION)
            .map(str::trim)
            .filter(|atom| !atom.is_empty())
            .map(str::to_string)
            .collect();
        if atoms.is_empty() {
            LabelExpression::Unrestricted
        } else {
            LabelExpression::Atoms(atoms)
        }
    }

    pub fn label(name: impl Into<String>) -> LabelExpression {
        LabelExpression::Atoms(SmallVec::from_elem(name.into(), 1))
    }

    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, LabelExpression::Unrestricted)
    }

    pub fn atoms(&self) -> &[String] {
        match self {
            LabelExpression::Unrestricted => &[],
            LabelExpression::Atoms(atoms) => atoms,
        }
    }

    #[inline]
    pub fn is_conjunction(&self) -> bool {
        self.atoms().len() > 1
    }

    /// The queue matching primitive: an unrestricted expression always
    /// matches; otherwise every atom must appear in the queue's label set, or
    /// the set must contain the [`ANY`] wildcard. A queue without a label set
    /// matches nothing.
    pub fn matches_queue(&self, queue_labels: Option<&Set<String>>) -> bool {
        let atoms = match self {
            LabelExpression::Unrestricted => return true,
            LabelExpression::Atoms(atoms) => atoms,
        };
        let Some(labels) = queue_labels else {
            return false;
        };
        atoms
            .iter()
            .all(|atom| labels.contains(atom.as_str()) || labels.contains(ANY))
    }
}

impl From<&str> for LabelExpression {
    fn from(raw: &str) -> Self {
        LabelExpression::parse(raw)
    }
}

impl std::fmt::Display for LabelExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LabelExpression::Unrestricted => write!(f, "{NO_LABEL}"),
            LabelExpression::Atoms(atoms) => write!(f, "{}", atoms.join(CONJUNCTION)),
        }
    }
}
