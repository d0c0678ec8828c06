use std::fmt;

use crate::RfError;
use crate::feature::{FeatureDescriptor, FeatureKind};
use crate::predict::Example;
use crate::value::Value;

/// Zero-based feature column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    /// Create a new feature index from a zero-based column position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based feature column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a [`Question`] compares an example's value to the stored split value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `value <= threshold`, used for continuous features.
    LessOrEqual,
    /// `value == category`, used for categorical features.
    Equal,
}

impl Comparison {
    /// Return the comparison used to split a feature of the given kind.
    #[must_use]
    pub fn for_kind(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Continuous => Comparison::LessOrEqual,
            FeatureKind::Categorical => Comparison::Equal,
        }
    }

    /// Return `true` when `value` falls on the "yes" side of `split_value`.
    #[must_use]
    pub fn holds(self, value: &Value, split_value: &Value) -> bool {
        match self {
            Comparison::LessOrEqual => value <= split_value,
            Comparison::Equal => value == split_value,
        }
    }

    /// Return the operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
        }
    }
}

/// The predicate held by a decision node, e.g. `petal_width <= 0.8`.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    feature: FeatureIndex,
    feature_name: String,
    comparison: Comparison,
    value: Value,
}

impl Question {
    /// Create the question splitting `descriptor` at `value`.
    pub(crate) fn new(descriptor: &FeatureDescriptor, value: Value) -> Self {
        Self {
            feature: descriptor.index(),
            feature_name: descriptor.name().to_string(),
            comparison: Comparison::for_kind(descriptor.kind()),
            value,
        }
    }

    /// Return the feature column this question tests.
    #[must_use]
    pub fn feature(&self) -> FeatureIndex {
        self.feature
    }

    /// Return the name of the feature column this question tests.
    #[must_use]
    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Return the comparison kind.
    #[must_use]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Return the threshold (continuous) or category (categorical).
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Answer the question for one example.
    ///
    /// # Errors
    ///
    /// | Variant                      | When                                          |
    /// |------------------------------|-----------------------------------------------|
    /// | [`RfError::SchemaMismatch`]  | the example has no column named like the feature |
    /// | [`RfError::NonNumericValue`] | a `<=` question meets a textual value         |
    pub fn ask(&self, example: &Example<'_>) -> Result<bool, RfError> {
        let value = example
            .get(&self.feature_name)
            .ok_or_else(|| RfError::SchemaMismatch {
                feature: self.feature_name.clone(),
            })?;
        if self.comparison == Comparison::LessOrEqual
            && (value.as_number().is_none() || self.value.as_number().is_none())
        {
            return Err(RfError::NonNumericValue {
                feature: self.feature_name.clone(),
                value: value.to_string(),
            });
        }
        Ok(self.comparison.holds(value, &self.value))
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.feature_name, self.comparison.symbol(), self.value)
    }
}

/// A node of a decision tree.
///
/// Trees are built bottom-up by the recursive builder and never change
/// afterwards. Structural equality is what the builder uses to collapse a
/// decision whose two branches are identical.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A terminal leaf node.
    Leaf {
        /// Predicted label (majority of the training rows that reached it).
        prediction: Value,
    },
    /// An interior decision node.
    Decision {
        /// The predicate tested at this node.
        question: Question,
        /// Subtree for examples answering "yes".
        yes: Box<Node>,
        /// Subtree for examples answering "no".
        no: Box<Node>,
    },
}

impl Node {
    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the number of edges on the longest path to a leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Decision { yes, no, .. } => 1 + yes.depth().max(no.depth()),
        }
    }

    /// Return the number of nodes in this subtree.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision { yes, no, .. } => 1 + yes.n_nodes() + no.n_nodes(),
        }
    }

    /// Return the number of leaves in this subtree.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision { yes, no, .. } => yes.n_leaves() + no.n_leaves(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::ColumnLayout;

    fn width_question() -> Question {
        let descriptor = FeatureDescriptor::new(1, "petal_width", FeatureKind::Continuous);
        Question::new(&descriptor, Value::from(0.8))
    }

    fn color_question() -> Question {
        let descriptor = FeatureDescriptor::new(0, "color", FeatureKind::Categorical);
        Question::new(&descriptor, Value::from("red"))
    }

    fn layout() -> ColumnLayout {
        ColumnLayout::new(&["color".to_string(), "petal_width".to_string()])
    }

    // --- FeatureIndex ---

    #[test]
    fn feature_index_roundtrip() {
        let fi = FeatureIndex::new(7);
        assert_eq!(fi.index(), 7);
    }

    #[test]
    fn feature_index_display() {
        assert_eq!(format!("{}", FeatureIndex::new(3)), "3");
    }

    // --- Comparison ---

    #[test]
    fn comparison_follows_kind() {
        assert_eq!(Comparison::for_kind(FeatureKind::Continuous), Comparison::LessOrEqual);
        assert_eq!(Comparison::for_kind(FeatureKind::Categorical), Comparison::Equal);
    }

    #[test]
    fn less_or_equal_includes_threshold() {
        let t = Value::from(2.0);
        assert!(Comparison::LessOrEqual.holds(&Value::from(2.0), &t));
        assert!(!Comparison::LessOrEqual.holds(&Value::from(2.5), &t));
    }

    // --- Question ---

    #[test]
    fn question_display() {
        assert_eq!(width_question().to_string(), "petal_width <= 0.8");
        assert_eq!(color_question().to_string(), "color = red");
    }

    #[test]
    fn ask_continuous() {
        let layout = layout();
        let row = vec![Value::from("blue"), Value::from(0.5)];
        assert!(width_question().ask(&layout.example(&row)).unwrap());
        let row = vec![Value::from("blue"), Value::from(1.5)];
        assert!(!width_question().ask(&layout.example(&row)).unwrap());
    }

    #[test]
    fn ask_categorical() {
        let layout = layout();
        let row = vec![Value::from("red"), Value::from(0.5)];
        assert!(color_question().ask(&layout.example(&row)).unwrap());
        let row = vec![Value::from("green"), Value::from(0.5)];
        assert!(!color_question().ask(&layout.example(&row)).unwrap());
    }

    #[test]
    fn ask_missing_column() {
        let layout = ColumnLayout::new(&["color".to_string()]);
        let row = vec![Value::from("red")];
        let err = width_question().ask(&layout.example(&row)).unwrap_err();
        assert!(matches!(err, RfError::SchemaMismatch { ref feature } if feature == "petal_width"));
    }

    #[test]
    fn ask_text_against_threshold() {
        let layout = layout();
        let row = vec![Value::from("red"), Value::from("wide")];
        let err = width_question().ask(&layout.example(&row)).unwrap_err();
        assert!(matches!(err, RfError::NonNumericValue { .. }));
    }

    // --- Node ---

    fn leaf(label: &str) -> Node {
        Node::Leaf {
            prediction: Value::from(label),
        }
    }

    fn make_decision() -> Node {
        Node::Decision {
            question: width_question(),
            yes: Box::new(leaf("setosa")),
            no: Box::new(Node::Decision {
                question: color_question(),
                yes: Box::new(leaf("versicolor")),
                no: Box::new(leaf("virginica")),
            }),
        }
    }

    #[test]
    fn leaf_counts() {
        let l = leaf("A");
        assert!(l.is_leaf());
        assert_eq!(l.depth(), 0);
        assert_eq!(l.n_nodes(), 1);
        assert_eq!(l.n_leaves(), 1);
    }

    #[test]
    fn decision_counts() {
        let d = make_decision();
        assert!(!d.is_leaf());
        assert_eq!(d.depth(), 2);
        assert_eq!(d.n_nodes(), 5);
        assert_eq!(d.n_leaves(), 3);
    }

    #[test]
    fn structural_equality() {
        assert_eq!(make_decision(), make_decision());
        assert_ne!(leaf("A"), leaf("B"));
    }
}
