//! # Classifier Artifact
//!
//! The scorer talks to its classifier through [`ProbabilityClassifier`]: a
//! named feature contract plus a positive-class probability per row.
//!
//! The shipped implementation, [`BoostedTreeClassifier`], evaluates a binary
//! gradient-boosted tree ensemble saved in XGBoost's JSON model format
//! (`Booster.save_model("model.json")`). The document is validated completely
//! at load time, so prediction itself cannot fail on a malformed tree.
//!
//! Trees are stored and evaluated in `f32`, the precision the booster that
//! wrote them uses, so thresholds compare exactly as they did in training.

use crate::shared::schema::declared_features;
use ndarray::{Array1, ArrayView2};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A trained binary classifier, as the scorer sees it.
pub trait ProbabilityClassifier {
    /// Column names, in the order `predict_proba` expects matrix columns.
    fn feature_names(&self) -> &[String];

    /// Probability of the positive class for each row of `features`.
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError>;
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON model file: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error(
        "Unsupported objective '{0}'. Only binary logistic models (binary:logistic, reg:logistic) can be used for labeling."
    )]
    UnsupportedObjective(String),
    #[error("Unsupported booster. Only tree boosters (gbtree, dart) can be used for labeling.")]
    UnsupportedBooster,
    #[error("The model has {0} output classes, but labeling requires a binary classifier.")]
    UnsupportedClassCount(usize),
    #[error("Invalid model parameter '{name}': '{value}'")]
    InvalidParameter { name: &'static str, value: String },
    #[error("Tree {tree} uses categorical splits, which are not supported.")]
    CategoricalSplit { tree: usize },
    #[error("Tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error("Tree {tree} splits on feature {index}, but the model declares only {num_features} features.")]
    FeatureIndexOutOfRange {
        tree: usize,
        index: i64,
        num_features: usize,
    },
    #[error(
        "The model lists {names} feature names but declares {num_features} features. A model saved without feature names must have exactly {num_features} declared features."
    )]
    FeatureNameCountMismatch { names: usize, num_features: usize },
    #[error("DART model has {trees} trees but {weights} tree weights.")]
    DartWeightCountMismatch { trees: usize, weights: usize },
    #[error("Input matrix has {found} feature columns, but the model was trained on {expected}.")]
    MismatchedFeatureCount { found: usize, expected: usize },
}

// --- Serialized model layout ---
// Only the fields needed for prediction are read; everything else in the
// document is ignored.

#[derive(Deserialize)]
struct ModelDocument {
    learner: LearnerSection,
}

#[derive(Deserialize)]
struct LearnerSection {
    #[serde(default)]
    attributes: LearnerAttributes,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterSection,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveSection,
}

/// Set when the model was trained with early stopping. Prediction then uses
/// only the rounds up to and including the best one.
#[derive(Deserialize, Default)]
struct LearnerAttributes {
    #[serde(default)]
    best_iteration: Option<String>,
}

#[derive(Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    num_feature: String,
}

#[derive(Deserialize)]
struct ObjectiveSection {
    name: String,
}

#[derive(Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
enum BoosterSection {
    Gbtree {
        model: TreeEnsembleSection,
    },
    Dart {
        gbtree: GbtreeSection,
        weight_drop: Vec<f32>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Deserialize)]
struct GbtreeSection {
    model: TreeEnsembleSection,
}

#[derive(Deserialize)]
struct TreeEnsembleSection {
    #[serde(default)]
    gbtree_model_param: Option<GbtreeModelParam>,
    trees: Vec<TreeSection>,
}

#[derive(Deserialize)]
struct GbtreeModelParam {
    #[serde(default)]
    num_parallel_tree: Option<String>,
}

impl TreeEnsembleSection {
    /// Trees added per boosting round.
    fn trees_per_round(&self) -> Result<usize, ModelError> {
        let raw = self
            .gbtree_model_param
            .as_ref()
            .and_then(|p| p.num_parallel_tree.as_deref());
        match raw {
            None => Ok(1),
            Some(raw) => match parse_param::<usize>("num_parallel_tree", raw)? {
                0 => Err(ModelError::InvalidParameter {
                    name: "num_parallel_tree",
                    value: raw.to_string(),
                }),
                n => Ok(n),
            },
        }
    }
}

#[derive(Deserialize)]
struct TreeSection {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<i32>,
}

/// `default_left` is written as 0/1 integers by some versions and as
/// booleans by others.
#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

const LEAF_MARKER: i32 = -1;
const NUMERICAL_SPLIT: i32 = 0;
const LOGISTIC_OBJECTIVES: [&str; 2] = ["binary:logistic", "reg:logistic"];

// --- Compiled model ---

#[derive(Debug, Clone, Copy, PartialEq)]
enum TreeNode {
    Leaf {
        value: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
}

#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Compiles one serialized tree, checking every index it will follow.
    fn compile(index: usize, raw: TreeSection, num_features: usize) -> Result<Self, ModelError> {
        let malformed = |reason: String| ModelError::MalformedTree {
            tree: index,
            reason,
        };

        let n = raw.left_children.len();
        if n == 0 {
            return Err(malformed("tree has no nodes".to_string()));
        }
        for (field, len) in [
            ("right_children", raw.right_children.len()),
            ("split_indices", raw.split_indices.len()),
            ("split_conditions", raw.split_conditions.len()),
            ("default_left", raw.default_left.len()),
        ] {
            if len != n {
                return Err(malformed(format!(
                    "{field} has {len} entries, expected {n}"
                )));
            }
        }
        if raw.split_type.iter().any(|&t| t != NUMERICAL_SPLIT) {
            return Err(ModelError::CategoricalSplit { tree: index });
        }

        let mut nodes = Vec::with_capacity(n);
        for node in 0..n {
            let left = raw.left_children[node];
            if left == LEAF_MARKER {
                nodes.push(TreeNode::Leaf {
                    value: raw.split_conditions[node],
                });
                continue;
            }

            let right = raw.right_children[node];
            // Assumes children are stored after their parent, as XGBoost writes
            // pruned trees. This also rules out cycles.
            let child = |c: i32| -> Result<usize, ModelError> {
                match usize::try_from(c) {
                    Ok(c) if c > node && c < n => Ok(c),
                    _ => Err(malformed(format!("node {node} has invalid child {c}"))),
                }
            };
            let feature = raw.split_indices[node];
            let feature_index = usize::try_from(feature)
                .ok()
                .filter(|&f| f < num_features)
                .ok_or(ModelError::FeatureIndexOutOfRange {
                    tree: index,
                    index: feature,
                    num_features,
                })?;

            nodes.push(TreeNode::Split {
                feature: feature_index,
                threshold: raw.split_conditions[node],
                left: child(left)?,
                right: child(right)?,
                default_left: raw.default_left[node].is_set(),
            });
        }
        Ok(Self { nodes })
    }

    #[inline]
    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row[feature];
                    let go_left = if x.is_nan() {
                        default_left
                    } else {
                        x < threshold
                    };
                    i = if go_left { left } else { right };
                }
            }
        }
    }
}

/// A binary logistic tree ensemble loaded from an XGBoost JSON model.
#[derive(Debug, Clone)]
pub struct BoostedTreeClassifier {
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
    /// Per-tree output scale: all ones for gbtree, `weight_drop` for dart.
    tree_weights: Vec<f32>,
    /// `base_score` moved to margin (log-odds) space.
    base_margin: f32,
}

impl BoostedTreeClassifier {
    /// Loads and validates a model file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json(&text)?;
        log::info!(
            "Loaded tree ensemble from '{}': {} trees over {} features",
            path.display(),
            model.num_trees(),
            model.feature_names.len()
        );
        Ok(model)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let document: ModelDocument = serde_json::from_str(text)?;
        let learner = document.learner;

        if !LOGISTIC_OBJECTIVES.contains(&learner.objective.name.as_str()) {
            return Err(ModelError::UnsupportedObjective(learner.objective.name));
        }

        let params = learner.learner_model_param;
        if let Some(raw) = params.num_class.as_deref() {
            let num_class: usize = parse_param("num_class", raw)?;
            if num_class > 1 {
                return Err(ModelError::UnsupportedClassCount(num_class));
            }
        }
        let num_features: usize = parse_param("num_feature", &params.num_feature)?;
        let base_score: f32 = parse_param("base_score", &params.base_score)?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(ModelError::InvalidParameter {
                name: "base_score",
                value: params.base_score,
            });
        }

        let feature_names = if learner.feature_names.is_empty() {
            declared_features()
        } else {
            learner.feature_names
        };
        if feature_names.len() != num_features {
            return Err(ModelError::FeatureNameCountMismatch {
                names: feature_names.len(),
                num_features,
            });
        }

        let best_iteration: Option<usize> = learner
            .attributes
            .best_iteration
            .as_deref()
            .map(|raw| parse_param("best_iteration", raw))
            .transpose()?;

        let (mut raw_trees, mut tree_weights, trees_per_round) = match learner.gradient_booster {
            BoosterSection::Gbtree { model } => {
                let per_round = model.trees_per_round()?;
                let weights = vec![1.0; model.trees.len()];
                (model.trees, weights, per_round)
            }
            BoosterSection::Dart {
                gbtree,
                weight_drop,
            } => {
                if weight_drop.len() != gbtree.model.trees.len() {
                    return Err(ModelError::DartWeightCountMismatch {
                        trees: gbtree.model.trees.len(),
                        weights: weight_drop.len(),
                    });
                }
                let per_round = gbtree.model.trees_per_round()?;
                (gbtree.model.trees, weight_drop, per_round)
            }
            BoosterSection::Unsupported => return Err(ModelError::UnsupportedBooster),
        };

        if let Some(best) = best_iteration {
            let kept = best
                .saturating_add(1)
                .saturating_mul(trees_per_round)
                .min(raw_trees.len());
            if kept < raw_trees.len() {
                log::info!(
                    "Early-stopped model: using the first {kept} of {} trees (best iteration {best})",
                    raw_trees.len()
                );
            }
            raw_trees.truncate(kept);
            tree_weights.truncate(kept);
        }

        let trees = raw_trees
            .into_iter()
            .enumerate()
            .map(|(i, raw)| RegressionTree::compile(i, raw, num_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            feature_names,
            trees,
            tree_weights,
            base_margin: (base_score / (1.0 - base_score)).ln(),
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn margin(&self, row: &[f32]) -> f32 {
        self.trees
            .iter()
            .zip(&self.tree_weights)
            .fold(self.base_margin, |acc, (tree, &w)| {
                acc + w * tree.leaf_value(row)
            })
    }
}

impl ProbabilityClassifier for BoostedTreeClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        if features.ncols() != self.feature_names.len() {
            return Err(ModelError::MismatchedFeatureCount {
                found: features.ncols(),
                expected: self.feature_names.len(),
            });
        }

        let mut row_buffer = vec![0f32; features.ncols()];
        let probabilities = features
            .rows()
            .into_iter()
            .map(|row| {
                for (slot, &x) in row_buffer.iter_mut().zip(row.iter()) {
                    *slot = x as f32;
                }
                f64::from(sigmoid(self.margin(&row_buffer)))
            })
            .collect::<Vec<f64>>();
        Ok(Array1::from_vec(probabilities))
    }
}

#[inline]
fn sigmoid(margin: f32) -> f32 {
    1.0 / (1.0 + (-margin).exp())
}

/// Model parameters are serialized as strings; `base_score` may additionally
/// be wrapped in brackets (`"[5E-1]"`).
fn parse_param<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ModelError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .parse()
        .map_err(|_| ModelError::InvalidParameter {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use serde_json::{Value, json};

    /// A single stump on feature 0 at 0.5: left leaf -1.0, right leaf 2.0.
    fn stump() -> Value {
        json!({
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [0.5, -1.0, 2.0],
            "default_left": [1, 0, 0],
            "split_type": [0, 0, 0],
            "base_weights": [0.0, -1.0, 2.0]
        })
    }

    fn model_json(trees: Vec<Value>, base_score: &str) -> Value {
        json!({
            "learner": {
                "attributes": {},
                "feature_names": ["depth", "vaf"],
                "feature_types": ["float", "float"],
                "gradient_booster": {
                    "name": "gbtree",
                    "model": {
                        "gbtree_model_param": { "num_trees": trees.len().to_string() },
                        "trees": trees,
                        "tree_info": [0]
                    }
                },
                "learner_model_param": {
                    "base_score": base_score,
                    "num_class": "0",
                    "num_feature": "2",
                    "num_target": "1"
                },
                "objective": { "name": "binary:logistic", "reg_loss_param": { "scale_pos_weight": "1" } }
            },
            "version": [2, 0, 3]
        })
    }

    fn sig(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    #[test]
    fn stump_predicts_sigmoid_of_leaf() {
        let model =
            BoostedTreeClassifier::from_json(&model_json(vec![stump()], "5E-1").to_string())
                .unwrap();
        assert_eq!(model.num_trees(), 1);
        assert_eq!(model.feature_names(), &["depth".to_string(), "vaf".to_string()]);

        let proba = model
            .predict_proba(array![[0.0, 9.0], [1.0, 9.0], [0.5, 0.0]].view())
            .unwrap();
        assert_abs_diff_eq!(proba[0], sig(-1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(proba[1], sig(2.0), epsilon = 1e-6);
        // Equal to the threshold goes right.
        assert_abs_diff_eq!(proba[2], sig(2.0), epsilon = 1e-6);
    }

    #[test]
    fn base_score_shifts_the_margin() {
        let model =
            BoostedTreeClassifier::from_json(&model_json(vec![stump()], "[2.5E-1]").to_string())
                .unwrap();
        let proba = model.predict_proba(array![[0.0, 0.0]].view()).unwrap();
        let base_margin = (0.25f64 / 0.75).ln();
        assert_abs_diff_eq!(proba[0], sig(base_margin - 1.0), epsilon = 1e-6);
    }

    #[test]
    fn trees_are_summed() {
        let model = BoostedTreeClassifier::from_json(
            &model_json(vec![stump(), stump()], "5E-1").to_string(),
        )
        .unwrap();
        let proba = model.predict_proba(array![[1.0, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(4.0), epsilon = 1e-6);
    }

    #[test]
    fn best_iteration_limits_the_rounds_used() {
        let mut doc = model_json(vec![stump(), stump()], "5E-1");
        doc["learner"]["attributes"] = json!({ "best_iteration": "0", "best_score": "0.1" });
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        assert_eq!(model.num_trees(), 1);
        let proba = model.predict_proba(array![[1.0, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(2.0), epsilon = 1e-6);

        // A round holds num_parallel_tree trees.
        let mut doc = model_json(vec![stump(), stump(), stump(), stump()], "5E-1");
        doc["learner"]["attributes"] = json!({ "best_iteration": "0" });
        doc["learner"]["gradient_booster"]["model"]["gbtree_model_param"] =
            json!({ "num_parallel_tree": "2", "num_trees": "4" });
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        assert_eq!(model.num_trees(), 2);

        // A best iteration past the end keeps everything.
        let mut doc = model_json(vec![stump(), stump()], "5E-1");
        doc["learner"]["attributes"] = json!({ "best_iteration": "9" });
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        assert_eq!(model.num_trees(), 2);
    }

    #[test]
    fn best_iteration_truncates_dart_weights() {
        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["attributes"] = json!({ "best_iteration": "1" });
        doc["learner"]["gradient_booster"] = json!({
            "name": "dart",
            "gbtree": {
                "name": "gbtree",
                "model": { "trees": [stump(), stump(), stump()], "tree_info": [0, 0, 0] }
            },
            "weight_drop": [1.0, 0.5, 4.0]
        });
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        assert_eq!(model.num_trees(), 2);
        let proba = model.predict_proba(array![[1.0, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(3.0), epsilon = 1e-6);
    }

    #[test]
    fn rejects_unparsable_best_iteration() {
        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["attributes"] = json!({ "best_iteration": "early" });
        let err = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                name: "best_iteration",
                ..
            }
        ));
    }

    #[test]
    fn nan_follows_default_direction() {
        let model =
            BoostedTreeClassifier::from_json(&model_json(vec![stump()], "5E-1").to_string())
                .unwrap();
        let proba = model.predict_proba(array![[f64::NAN, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(-1.0), epsilon = 1e-6);
    }

    #[test]
    fn dart_weights_scale_each_tree() {
        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["gradient_booster"] = json!({
            "name": "dart",
            "gbtree": {
                "name": "gbtree",
                "model": { "trees": [stump(), stump()], "tree_info": [0, 0] }
            },
            "weight_drop": [1.0, 0.5]
        });
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        let proba = model.predict_proba(array![[1.0, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(3.0), epsilon = 1e-6);
    }

    #[test]
    fn boolean_default_left_is_accepted() {
        let mut tree = stump();
        tree["default_left"] = json!([false, false, false]);
        let model =
            BoostedTreeClassifier::from_json(&model_json(vec![tree], "5E-1").to_string()).unwrap();
        let proba = model.predict_proba(array![[f64::NAN, 0.0]].view()).unwrap();
        assert_abs_diff_eq!(proba[0], sig(2.0), epsilon = 1e-6);
    }

    #[test]
    fn missing_feature_names_fall_back_to_declared_schema() {
        let mut doc = model_json(vec![stump()], "5E-1");
        let learner = doc["learner"].as_object_mut().unwrap();
        learner.remove("feature_names");
        learner["learner_model_param"]["num_feature"] = json!("37");
        let model = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap();
        assert_eq!(model.feature_names(), declared_features().as_slice());

        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"].as_object_mut().unwrap().remove("feature_names");
        match BoostedTreeClassifier::from_json(&doc.to_string()) {
            Err(ModelError::FeatureNameCountMismatch { names, num_features }) => {
                assert_eq!(names, 37);
                assert_eq!(num_features, 2);
            }
            other => panic!("Expected FeatureNameCountMismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn rejects_non_logistic_objective() {
        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["objective"]["name"] = json!("reg:squarederror");
        let err = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedObjective(name) if name == "reg:squarederror"));
    }

    #[test]
    fn rejects_multiclass_and_linear_models() {
        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["learner_model_param"]["num_class"] = json!("3");
        let err = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedClassCount(3)));

        let mut doc = model_json(vec![stump()], "5E-1");
        doc["learner"]["gradient_booster"] = json!({ "name": "gblinear", "model": {} });
        let err = BoostedTreeClassifier::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedBooster));
    }

    #[test]
    fn rejects_categorical_splits() {
        let mut tree = stump();
        tree["split_type"] = json!([1, 0, 0]);
        let err = BoostedTreeClassifier::from_json(&model_json(vec![tree], "5E-1").to_string())
            .unwrap_err();
        assert!(matches!(err, ModelError::CategoricalSplit { tree: 0 }));
    }

    #[test]
    fn rejects_out_of_range_structure() {
        let mut tree = stump();
        tree["split_indices"] = json!([5, 0, 0]);
        let err = BoostedTreeClassifier::from_json(&model_json(vec![tree], "5E-1").to_string())
            .unwrap_err();
        assert!(matches!(err, ModelError::FeatureIndexOutOfRange { index: 5, .. }));

        let mut tree = stump();
        tree["left_children"] = json!([0, -1, -1]);
        let err = BoostedTreeClassifier::from_json(&model_json(vec![tree], "5E-1").to_string())
            .unwrap_err();
        assert!(matches!(err, ModelError::MalformedTree { tree: 0, .. }));

        let mut tree = stump();
        tree["split_conditions"] = json!([0.5, -1.0]);
        let err = BoostedTreeClassifier::from_json(&model_json(vec![tree], "5E-1").to_string())
            .unwrap_err();
        assert!(matches!(err, ModelError::MalformedTree { .. }));
    }

    #[test]
    fn rejects_wrong_input_width() {
        let model =
            BoostedTreeClassifier::from_json(&model_json(vec![stump()], "5E-1").to_string())
                .unwrap();
        let err = model.predict_proba(array![[0.0, 0.0, 0.0]].view()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::MismatchedFeatureCount {
                found: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let err = BoostedTreeClassifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ModelError::IoError { .. }));
    }
}
