//! Input document model: the feature scaler parameters and the boosted-tree dump.
//!
//! Both documents are decoded eagerly into owned types here; nothing downstream
//! ever sees raw JSON. The `"f<index>"` split token of the dump format is a
//! serialization detail and is converted to a numeric feature index at this
//! boundary.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{ConvertError, ConvertResult};

/// Per-feature normalization parameters, as exported from a fitted
/// `StandardScaler`: `mean` and `scale` are indexed by feature position.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerSpec {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerSpec {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Load and validate the scaler document. Mismatched `mean`/`scale`
    /// lengths are rejected here, before any code is emitted.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let text = fs::read_to_string(path)?;
        let spec: ScalerSpec = serde_json::from_str(&text)?;
        if spec.mean.len() != spec.scale.len() {
            return Err(ConvertError::ScalerLengthMismatch {
                mean: spec.mean.len(),
                scale: spec.scale.len(),
            });
        }
        debug!("loaded scaler with {} features from {:?}", spec.n_features(), path);
        Ok(spec)
    }
}

/// A node of a boosted regression tree.
///
/// Exactly two shapes exist; anything else in the input document is a
/// structural error at decode time, so code emission can match exhaustively
/// without re-validating.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Decode one node (and its subtree) from the dump format.
    ///
    /// A leaf carries `leaf`; a split carries `split` (an `"f<index>"` token),
    /// `split_condition` and `children` with exactly two entries. Bookkeeping
    /// keys of real dumps (`nodeid`, `depth`, `yes`, `no`, `missing`, `gain`,
    /// `cover`) are ignored. A node carrying both `leaf` and split keys
    /// decodes as a leaf.
    pub fn from_value(node: &Value) -> ConvertResult<Self> {
        let obj = node.as_object().ok_or(ConvertError::InvalidNodeValue {
            field: "node",
            expected: "JSON object",
        })?;

        if let Some(leaf) = obj.get("leaf") {
            let value = leaf.as_f64().ok_or(ConvertError::InvalidNodeValue {
                field: "leaf",
                expected: "number",
            })?;
            return Ok(TreeNode::Leaf { value });
        }

        match (obj.get("split"), obj.get("split_condition"), obj.get("children")) {
            (Some(split), Some(condition), Some(children)) => {
                let token = split.as_str().ok_or(ConvertError::InvalidNodeValue {
                    field: "split",
                    expected: "string",
                })?;
                let feature = parse_feature_token(token)?;
                let threshold = condition.as_f64().ok_or(ConvertError::InvalidNodeValue {
                    field: "split_condition",
                    expected: "number",
                })?;
                let children = children.as_array().ok_or(ConvertError::InvalidNodeValue {
                    field: "children",
                    expected: "array",
                })?;
                if children.len() != 2 {
                    return Err(ConvertError::ChildArity {
                        found: children.len(),
                    });
                }
                Ok(TreeNode::Split {
                    feature,
                    threshold,
                    left: Box::new(TreeNode::from_value(&children[0])?),
                    right: Box::new(TreeNode::from_value(&children[1])?),
                })
            }
            _ => Err(ConvertError::UnexpectedNodeShape {
                keys: obj.keys().cloned().collect(),
            }),
        }
    }

    /// Largest feature index referenced by any split in this subtree.
    pub fn max_feature(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature, left, right, ..
            } => {
                let mut max = *feature;
                for child in [left, right] {
                    if let Some(m) = child.max_feature() {
                        max = max.max(m);
                    }
                }
                Some(max)
            }
        }
    }
}

/// Decode an `"f<index>"` token into a feature index.
fn parse_feature_token(token: &str) -> ConvertResult<usize> {
    token
        .strip_prefix('f')
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or_else(|| ConvertError::InvalidFeatureRef {
            token: token.to_string(),
        })
}

/// The boosted ensemble: tree roots in dump order. Position is both the
/// generated function identifier and the summation order.
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub trees: Vec<TreeNode>,
}

impl Ensemble {
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Load the model dump. The document is an ordered JSON array of tree
    /// objects; each is validated structurally while decoding.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        let roots = value.as_array().ok_or(ConvertError::InvalidNodeValue {
            field: "model",
            expected: "array of trees",
        })?;
        let trees = roots
            .iter()
            .map(TreeNode::from_value)
            .collect::<ConvertResult<Vec<_>>>()?;
        debug!("loaded ensemble with {} trees from {:?}", trees.len(), path);
        Ok(Ensemble { trees })
    }

    /// Reject splits referencing features the scaler does not define.
    pub fn validate_features(&self, n_features: usize) -> ConvertResult<()> {
        for (tree, root) in self.trees.iter().enumerate() {
            if let Some(feature) = root.max_feature() {
                if feature >= n_features {
                    return Err(ConvertError::FeatureOutOfBounds {
                        tree,
                        feature,
                        n_features,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_leaf() {
        let node = TreeNode::from_value(&json!({"nodeid": 3, "leaf": -0.125})).unwrap();
        assert_eq!(node, TreeNode::Leaf { value: -0.125 });
    }

    #[test]
    fn test_decode_split_with_bookkeeping_keys() {
        let node = TreeNode::from_value(&json!({
            "nodeid": 0, "depth": 0, "split": "f7", "split_condition": 0.5,
            "yes": 1, "no": 2, "missing": 1, "gain": 12.5, "cover": 100.0,
            "children": [
                {"nodeid": 1, "leaf": 1.0},
                {"nodeid": 2, "leaf": -1.0}
            ]
        }))
        .unwrap();
        match node {
            TreeNode::Split {
                feature, threshold, ..
            } => {
                assert_eq!(feature, 7);
                assert_eq!(threshold, 0.5);
            }
            other => panic!("expected split, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_three_children() {
        let err = TreeNode::from_value(&json!({
            "split": "f0", "split_condition": 0.5,
            "children": [{"leaf": 1.0}, {"leaf": 2.0}, {"leaf": 3.0}]
        }))
        .unwrap_err();
        assert!(matches!(err, ConvertError::ChildArity { found: 3 }));
    }

    #[test]
    fn test_decode_rejects_unknown_shape() {
        let err = TreeNode::from_value(&json!({"nodeid": 0, "gain": 1.0})).unwrap_err();
        match err {
            ConvertError::UnexpectedNodeShape { keys } => {
                assert_eq!(keys, vec!["gain".to_string(), "nodeid".to_string()]);
            }
            other => panic!("expected UnexpectedNodeShape, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_bad_feature_token() {
        let err = TreeNode::from_value(&json!({
            "split": "feature_0", "split_condition": 0.5,
            "children": [{"leaf": 1.0}, {"leaf": -1.0}]
        }))
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidFeatureRef { .. }));
    }

    #[test]
    fn test_leaf_wins_over_split_keys() {
        let node = TreeNode::from_value(&json!({
            "leaf": 0.5, "split": "f0", "split_condition": 1.0, "children": []
        }))
        .unwrap();
        assert_eq!(node, TreeNode::Leaf { value: 0.5 });
    }

    #[test]
    fn test_max_feature_walks_subtrees() {
        let node = TreeNode::from_value(&json!({
            "split": "f1", "split_condition": 0.0,
            "children": [
                {"split": "f9", "split_condition": 2.5,
                 "children": [{"leaf": 0.1}, {"leaf": 0.2}]},
                {"leaf": -0.3}
            ]
        }))
        .unwrap();
        assert_eq!(node.max_feature(), Some(9));
    }

    #[test]
    fn test_validate_features_rejects_out_of_bounds() {
        let ensemble = Ensemble {
            trees: vec![TreeNode::Split {
                feature: 4,
                threshold: 0.5,
                left: Box::new(TreeNode::Leaf { value: 1.0 }),
                right: Box::new(TreeNode::Leaf { value: -1.0 }),
            }],
        };
        assert!(ensemble.validate_features(5).is_ok());
        let err = ensemble.validate_features(4).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::FeatureOutOfBounds {
                tree: 0,
                feature: 4,
                n_features: 4
            }
        ));
    }
}
