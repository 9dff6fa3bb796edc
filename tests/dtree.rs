use cartree::prelude::*;
use cartree::{gini_impurity, weighted_gini};

use std::collections::HashMap;


fn tennis() -> Sample {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dataset/play_tennis.csv");
    SampleReader::new()
        .file(path)
        .has_header(true)
        .ignore(["day"])
        .target_feature("play")
        .read()
        .unwrap()
}


fn labeled(features: Vec<Feature>, target: &[&str]) -> Sample {
    let mut features = features;
    features.push(Feature::categorical_from("class", target.iter()));
    Sample::from_features(features)
        .unwrap()
        .set_target("class")
        .unwrap()
}


fn record(pairs: &[(&str, &str)]) -> HashMap<String, OwnedValue> {
    pairs.iter()
        .map(|(k, v)| (k.to_string(), OwnedValue::from(*v)))
        .collect()
}


#[test]
fn single_class_gives_single_leaf() {
    let sample = labeled(
        vec![Feature::numeric_from("x", [1.0, 2.0, 3.0])],
        &["a", "a", "a"],
    );
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&sample).unwrap();

    let root = tree.classifier().unwrap().root();
    assert!(root.is_leaf());
    assert_eq!(root.impurity(), 0.0);
    assert_eq!(root.predicted_class(), Some("a"));
    assert_eq!(tree.predict(&sample).unwrap(), ["a", "a", "a"]);
}


#[test]
fn categorical_root_split() {
    let sample = labeled(
        vec![Feature::categorical_from("A", ["x", "x", "y", "y"])],
        &["0", "0", "1", "1"],
    );
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&sample).unwrap();

    let root = tree.classifier().unwrap().root();
    assert_eq!(root.feature(), "A");
    assert_eq!(root.threshold(), Some(&Threshold::Categorical("x".into())));
    assert_eq!(root.impurity(), 0.0);

    let left = root.left().unwrap();
    let right = root.right().unwrap();
    assert!(left.is_leaf() && right.is_leaf());
    assert_eq!(left.predicted_class(), Some("0"));
    assert_eq!(right.predicted_class(), Some("1"));
    assert_eq!(left.impurity(), 0.0);
    assert_eq!(right.impurity(), 0.0);
}


#[test]
fn numeric_root_split() {
    let sample = labeled(
        vec![Feature::numeric_from("x", [1.0, 2.0, 3.0, 4.0])],
        &["0", "0", "1", "1"],
    );
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&sample).unwrap();

    let root = tree.classifier().unwrap().root();
    assert_eq!(root.feature(), "x");
    assert_eq!(root.threshold(), Some(&Threshold::Numeric(2.5)));
    assert_eq!(root.impurity(), 0.0);
    assert_eq!(root.n_sample(), 4);
    assert_eq!(root.n_leaves(), 2);
}


#[test]
fn predict_before_fit() {
    let tree = DecisionTreeBuilder::new().build();
    let sample = tennis();
    assert!(matches!(tree.predict(&sample), Err(TreeError::NotFitted)));
    assert!(matches!(tree.print_tree(), Err(TreeError::NotFitted)));
    assert!(matches!(tree.tree_text(), Err(TreeError::NotFitted)));
}


#[test]
fn unbounded_tree_reproduces_training_labels() {
    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&sample).unwrap();

    let predictions = tree.predict(&sample).unwrap();
    assert_eq!(zero_one_loss(sample.target(), &predictions), 0.0);
}


#[test]
fn tennis_tree_structure() {
    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().max_depth(3).build();
    tree.fit(&sample).unwrap();

    let root = tree.classifier().unwrap().root();
    assert_eq!(root.feature(), "outlook");
    assert_eq!(
        root.threshold(),
        Some(&Threshold::Categorical("Overcast".into()))
    );
    assert!((root.impurity() - 10.0 / 14.0 * 0.5).abs() < 1e-12);
    assert_eq!(root.left().unwrap().predicted_class(), Some("Yes"));

    let right = root.right().unwrap();
    assert_eq!(right.feature(), "humidity");
    assert_eq!(right.threshold(), Some(&Threshold::Categorical("High".into())));

    // An unseen category goes right at every test.
    let query = record(&[
        ("outlook", "Rain"),
        ("temp", "Cold"),
        ("humidity", "High"),
        ("wind", "Weak"),
    ]);
    assert_eq!(tree.predict_instance(&query).unwrap(), "Yes");
}


#[test]
fn depth_is_bounded() {
    let sample = tennis();
    for max_depth in 0..4 {
        let mut tree = DecisionTreeBuilder::new().max_depth(max_depth).build();
        tree.fit(&sample).unwrap();
        let depth = tree.classifier().unwrap().root().depth();
        assert!(depth <= max_depth + 1, "depth {depth} > {max_depth} + 1");
    }
}


#[test]
fn chosen_split_never_worse_than_parent() {
    fn check(node: &Node, sample: &Sample, rows: Vec<usize>) {
        let (Some(left), Some(_)) = (node.left(), node.right()) else {
            return;
        };

        let mut counts = HashMap::new();
        for &i in &rows {
            *counts.entry(&sample.target()[i]).or_insert(0) += 1;
        }
        let parent = gini_impurity(counts.into_values());
        assert!(node.impurity() <= parent + 1e-12);

        let (l, r): (Vec<usize>, Vec<usize>) = rows.into_iter()
            .partition(|&i| {
                let child = node.route(&sample.row(i)).unwrap();
                std::ptr::eq(child, left)
            });
        let lr = |rows: &[usize]| {
            let mut counts = HashMap::new();
            for &i in rows {
                *counts.entry(&sample.target()[i]).or_insert(0) += 1;
            }
            counts.into_values().collect::<Vec<usize>>()
        };
        let score = weighted_gini(lr(&l), lr(&r));
        assert!((score - node.impurity()).abs() < 1e-12);

        check(node.left().unwrap(), sample, l);
        check(node.right().unwrap(), sample, r);
    }

    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&sample).unwrap();

    let n_sample = sample.shape().0;
    check(tree.classifier().unwrap().root(), &sample, (0..n_sample).collect());
}


#[test]
fn refit_replaces_tree() {
    let mut tree = DecisionTreeBuilder::new().build();

    let first = labeled(
        vec![Feature::numeric_from("x", [1.0, 2.0])],
        &["a", "b"],
    );
    tree.fit(&first).unwrap();
    assert_eq!(tree.classifier().unwrap().root().feature(), "x");

    let second = labeled(
        vec![Feature::categorical_from("c", ["p", "q"])],
        &["a", "b"],
    );
    tree.fit(&second).unwrap();
    assert_eq!(tree.classifier().unwrap().root().feature(), "c");
}


#[test]
fn predict_reports_missing_and_mismatched_features() {
    let train = labeled(
        vec![Feature::numeric_from("x", [1.0, 2.0])],
        &["a", "b"],
    );
    let mut tree = DecisionTreeBuilder::new().build();
    tree.fit(&train).unwrap();

    let missing = Sample::from_features(
        vec![Feature::numeric_from("z", [1.0])]
    ).unwrap();
    let err = tree.predict(&missing).unwrap_err();
    assert!(matches!(err, TreeError::MissingFeature { .. }), "got {err:?}");

    let mismatched = Sample::from_features(
        vec![Feature::categorical_from("x", ["1"])]
    ).unwrap();
    let err = tree.predict(&mismatched).unwrap_err();
    assert!(
        matches!(err, TreeError::FeatureTypeMismatch { .. }),
        "got {err:?}"
    );
}


#[test]
fn fit_rejects_malformed_samples() {
    let mut tree = DecisionTreeBuilder::new().build();

    let unlabeled = Sample::from_features(
        vec![Feature::numeric_from("x", [1.0, 2.0])]
    ).unwrap();
    assert!(matches!(tree.fit(&unlabeled), Err(TreeError::MissingTarget)));

    let only_target = labeled(Vec::new(), &["a", "b"]);
    assert!(matches!(tree.fit(&only_target), Err(TreeError::NoFeatures)));

    assert!(!tree.is_fitted());
}


#[test]
fn print_tree_layout() {
    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().max_depth(3).build();
    tree.fit(&sample).unwrap();

    let text = tree.tree_text().unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    let n_nodes = tree.classifier().unwrap().root().n_nodes();
    assert_eq!(lines.len(), n_nodes);
    assert_eq!(
        lines[0],
        "[root] level: 0, feat_name: outlook, threshold: Overcast, \
         gini_impurity: 0.3571, is_leaf: false",
    );
    assert_eq!(
        lines[1],
        "  [left] level: 1, feat_name: play, threshold: Yes, \
         gini_impurity: 0.0000, is_leaf: true",
    );
    assert!(lines[2].starts_with("  [right] level: 1, feat_name: humidity"));

    tree.print_tree().unwrap();
}


#[test]
fn json_round_trip_keeps_predictions() {
    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().max_depth(2).build();
    tree.fit(&sample).unwrap();

    let classifier = tree.classifier().unwrap();
    let json = classifier.to_json().unwrap();
    let restored = DTreeClassifier::from_json(&json).unwrap();

    assert_eq!(restored.tree_text(), classifier.tree_text());
    assert_eq!(
        restored.predict_all(&sample).unwrap(),
        tree.predict(&sample).unwrap(),
    );
}


#[test]
fn dot_file_is_written() {
    let sample = tennis();
    let mut tree = DecisionTreeBuilder::new().max_depth(1).build();
    tree.fit(&sample).unwrap();

    let path = std::env::temp_dir().join("cartree_dot_file_is_written.dot");
    tree.classifier().unwrap().to_dot_file(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(dot.starts_with("graph DecisionTree {"));
    assert!(dot.contains("outlook == Overcast ?"));
    assert!(dot.trim_end().ends_with('}'));
}


#[test]
fn extreme_numeric_values_split_cleanly() {
    let eps = f64::EPSILON;
    let columns = [
        [1.0 + eps, 1.0 + 2.0 * eps],
        [1e308, 1.7e308],
        [-1e308, 1.7e308],
        [f64::MAX, f64::INFINITY],
    ];

    for vals in columns {
        let sample = labeled(
            vec![Feature::numeric_from("x", vals)],
            &["p", "q"],
        );
        for mut tree in [
            DecisionTreeBuilder::new().build(),
            DecisionTreeBuilder::new().max_depth(3).build(),
        ] {
            tree.fit(&sample).unwrap();

            let root = tree.classifier().unwrap().root();
            assert_eq!(root.n_leaves(), 2, "values {vals:?}");
            assert_eq!(root.left().unwrap().n_sample(), 1);
            assert_eq!(root.right().unwrap().n_sample(), 1);
            assert_eq!(tree.predict(&sample).unwrap(), ["p", "q"]);
        }
    }
}
