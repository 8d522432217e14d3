//! Binary network membership masks.
//!
//! A mask marks which features (vertices/locations) belong to the network
//! or region under test: 1 = inside, 0 = outside. Construction enforces
//! binarity and the both-sides-nonempty invariant so the scorer's
//! normalization denominators are never zero.

use crate::error::NestError;

/// A validated binary membership mask with a network identifier.
///
/// The identifier keys the enrichment scores in the orchestrator output,
/// keeping the contract extensible to multiple simultaneous regions.
#[derive(Debug, Clone)]
pub struct NetworkMask {
    label: String,
    members: Vec<u8>,
    n_inside: usize,
}

impl NetworkMask {
    /// Default network identifier, matching the single-network case.
    pub const DEFAULT_LABEL: &'static str = "net_0";

    /// Build a mask from any integer-like sequence of 0/1 values.
    pub fn new(label: impl Into<String>, values: &[f64]) -> Result<Self, NestError> {
        if values.is_empty() {
            return Err(NestError::InvalidMembership {
                reason: "mask is empty".into(),
            });
        }
        let mut members = Vec::with_capacity(values.len());
        for &v in values {
            if v == 0.0 {
                members.push(0);
            } else if v == 1.0 {
                members.push(1);
            } else {
                return Err(NestError::InvalidMembership {
                    reason: format!(
                        "mask must contain only 0's and 1's (1 = in network/ROI, \
                         0 = outside), found {v}"
                    ),
                });
            }
        }
        let n_inside = members.iter().filter(|&&m| m == 1).count();
        if n_inside == 0 {
            return Err(NestError::InvalidMembership {
                reason: "mask marks no feature as inside the network".into(),
            });
        }
        if n_inside == members.len() {
            return Err(NestError::InvalidMembership {
                reason: "mask marks every feature as inside the network".into(),
            });
        }
        Ok(Self {
            label: label.into(),
            members,
            n_inside,
        })
    }

    /// Build a mask with the default network identifier.
    pub fn from_values(values: &[f64]) -> Result<Self, NestError> {
        Self::new(Self::DEFAULT_LABEL, values)
    }

    /// Network identifier used to key enrichment scores.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of features covered by the mask.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of in-network features.
    pub fn n_inside(&self) -> usize {
        self.n_inside
    }

    /// Whether feature i is inside the network.
    pub fn is_inside(&self, i: usize) -> bool {
        self.members[i] == 1
    }
}
