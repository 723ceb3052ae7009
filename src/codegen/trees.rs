//! Ensemble Emitter: one evaluation function per tree plus the logistic
//! aggregation function.

use std::io::{self, Write};

use crate::codegen::{format_float, tree_signature, PREDICT_SIGNATURE};
use crate::model::{Ensemble, TreeNode};

/// Write every `tree_<i>` function in dump order, then the `predict`
/// function that sums their scores and squashes with `1 / (1 + e^-score)`.
///
/// Per-tree weighting and the learning rate are already baked into leaf
/// values at training time, so the sum is unweighted.
pub fn write_definitions<W: Write>(source: &mut W, ensemble: &Ensemble) -> io::Result<()> {
    writeln!(source, "// Tree functions")?;
    for (index, root) in ensemble.trees.iter().enumerate() {
        writeln!(source, "{} {{", tree_signature(index))?;
        write_node(source, root)?;
        writeln!(source, "}}")?;
        writeln!(source)?;
    }
    write_predict(source, ensemble.len())
}

/// Depth-first pre-order translation: a leaf becomes a return statement,
/// a split becomes an if/else on the feature threshold.
fn write_node<W: Write>(source: &mut W, node: &TreeNode) -> io::Result<()> {
    match node {
        TreeNode::Leaf { value } => {
            writeln!(source, "return {};", format_float(*value))
        }
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            writeln!(source, "if (x[{feature}] < {}) {{", format_float(*threshold))?;
            write_node(source, left)?;
            writeln!(source, "}} else {{")?;
            write_node(source, right)?;
            writeln!(source, "}}")
        }
    }
}

fn write_predict<W: Write>(source: &mut W, n_trees: usize) -> io::Result<()> {
    writeln!(source, "{PREDICT_SIGNATURE} {{")?;
    writeln!(source, "    double score = 0.0;")?;
    for index in 0..n_trees {
        writeln!(source, "    score += tree_{index}(x);")?;
    }
    writeln!(source, "    double proba = 1.0 / (1.0 + std::exp(-score));")?;
    writeln!(source, "    return proba;")?;
    writeln!(source, "}}")
}
