//! Integration tests for evaluating predicted tables against expected tables.

use abundance_eval::prelude::*;

/// Create an expected table and a noisy prediction of it.
///
/// 12 gene families × 5 samples:
/// - Families 0-7: present in every sample
/// - Families 8-11: absent everywhere
///
/// The prediction misses family 7 in sample 0 and invents family 8 in
/// sample 1; other values are scaled by up to ±10%.
fn create_synthetic_tables() -> (ObservationTable, ObservationTable) {
    let n_families = 12;
    let n_samples = 5;

    let mut rng_seed = 42u64;
    let simple_rand = |seed: &mut u64| -> f64 {
        *seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        ((*seed >> 16) & 0x7FFF) as f64 / 32768.0
    };

    let mut expected_rows = Vec::new();
    let mut observed_rows = Vec::new();
    for family in 0..n_families {
        let mut expected = Vec::new();
        let mut observed = Vec::new();
        for sample in 0..n_samples {
            let value = if family < 8 {
                (10 * (family + 1) + sample) as f64
            } else {
                0.0
            };
            let noise = 0.9 + 0.2 * simple_rand(&mut rng_seed);
            let predicted = match (family, sample) {
                (7, 0) => 0.0,
                (8, 1) => 4.0,
                _ => (value * noise).round(),
            };
            expected.push(value);
            observed.push(predicted);
        }
        expected_rows.push(expected);
        observed_rows.push(observed);
    }

    let ids: Vec<String> = (0..n_families).map(|i| format!("K{:05}", i)).collect();
    let samples: Vec<String> = (0..n_samples).map(|i| format!("sample_{}", i)).collect();

    let expected =
        ObservationTable::from_rows(ids.clone(), samples.clone(), &expected_rows).unwrap();
    let observed = ObservationTable::from_rows(ids, samples, &observed_rows).unwrap();
    (observed, expected)
}

#[test]
fn test_dataset_evaluation() {
    let (observed, expected) = create_synthetic_tables();

    let eval = evaluate_dataset(&observed, &expected, &EvaluationConfig::default()).unwrap();

    assert_eq!(eval.overlapping_ids.len(), 12);
    assert_eq!(eval.n_points(), 60);
    assert!(eval.pearson.r > 0.9, "pearson r = {}", eval.pearson.r);
    assert!(eval.spearman.r > 0.8, "spearman r = {}", eval.spearman.r);
    assert!(eval.pearson.p_value < 1e-6);
    assert!(eval.spearman.p_value < 1e-6);
}

#[test]
fn test_evaluation_is_reproducible() {
    let (observed, expected) = create_synthetic_tables();
    let config = EvaluationConfig::default();

    let first = evaluate_dataset(&observed, &expected, &config).unwrap();
    let second = evaluate_dataset(&observed, &expected, &config).unwrap();
    assert_eq!(first, second);

    let mut sorted_ids = first.overlapping_ids.clone();
    sorted_ids.sort();
    assert_eq!(first.overlapping_ids, sorted_ids);
}

#[test]
fn test_partial_overlap() {
    let (observed, expected) = create_synthetic_tables();
    let subset = observed.subset_observations(&["K00003", "K00001", "K00010"]).unwrap();

    let eval = evaluate_dataset(&subset, &expected, &EvaluationConfig::default()).unwrap();
    assert_eq!(eval.overlapping_ids, vec!["K00001", "K00003", "K00010"]);
    assert_eq!(eval.n_points(), 15);
}

#[test]
fn test_no_shared_ids() {
    let (observed, _) = create_synthetic_tables();
    let other = ObservationTable::from_rows(
        vec!["unrelated".into()],
        vec!["sample_0".into()],
        &[vec![1.0]],
    )
    .unwrap();

    let result = evaluate_dataset(&observed, &other, &EvaluationConfig::default());
    assert!(matches!(result, Err(EvalError::NoOverlap)));
}

#[test]
fn test_presence_accuracy_from_tables() {
    let (observed, expected) = create_synthetic_tables();
    let config = EvaluationConfig::default().with_presence_policy(FractionalPolicy::Reject);
    let eval = evaluate_dataset(&observed, &expected, &config).unwrap();

    // 40 expected-present values, one missed; 20 expected-absent, one invented.
    assert_eq!(eval.presence, ConfusionCounts::new(39, 1, 1, 19));

    let (obs, exp): (Vec<f64>, Vec<f64>) = eval.scatter_points.iter().copied().unzip();
    let counts = confusion_matrix(&obs, &exp, config.presence_policy).unwrap();
    assert_eq!(counts, eval.presence);

    let report = accuracy_stats(&counts).unwrap();
    assert!((report.sensitivity - 39.0 / 40.0).abs() < 1e-12);
    assert!((report.false_positive_rate - 1.0 / 20.0).abs() < 1e-12);
    assert!((report.accuracy - 58.0 / 60.0).abs() < 1e-12);
}

#[test]
fn test_roc_over_prediction_trials() {
    let expected = vec![5.0, 3.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0];
    let predictions = [
        // Calls everything absent except one hit
        vec![2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        // Half the positives, one false call
        vec![4.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        // All positives, two false calls
        vec![6.0, 3.0, 1.0, 2.0, 1.0, 1.0, 0.0, 0.0],
        // Calls everything present
        vec![1.0; 8],
    ];
    let trials: Vec<PairedSample> = predictions
        .iter()
        .map(|p| PairedSample::new(p.clone(), expected.clone()).unwrap())
        .collect();

    let config = EvaluationConfig::default();
    let analysis = roc_analysis(&trials, &config).unwrap();
    let xy: Vec<(f64, f64)> = analysis.points.iter().map(RocPoint::as_tuple).collect();
    assert_eq!(xy, vec![(0.0, 0.25), (0.25, 0.5), (0.5, 1.0), (1.0, 1.0)]);

    // Trapezoids: 0.25*0.75 + 0.25*1.5 + 0.5*2.0 = 1.5625 -> G = 0.5625
    assert!((analysis.auc - 0.78125).abs() < 1e-12);

    let parallel = roc_points_par(&trials, &config).unwrap();
    assert_eq!(parallel, analysis.points);
}

#[test]
fn test_config_drives_spearman_tails() {
    let (observed, expected) = create_synthetic_tables();
    let config = EvaluationConfig::from_yaml("tails: low\n").unwrap();

    let eval = evaluate_dataset(&observed, &expected, &config).unwrap();
    // Strong positive correlation: the lower tail holds almost all the mass.
    assert!(eval.spearman.p_value > 0.99);
}

#[test]
fn test_config_presence_policy_reaches_every_entry_point() {
    let (observed, _) = create_synthetic_tables();
    let mut expected_rows = Vec::new();
    for family in 0..12 {
        let value = if family < 8 { 10.0 } else { 0.0 };
        expected_rows.push(vec![value; 5]);
    }
    // A fractional reference value, as a normalized table would carry.
    expected_rows[3][2] = 0.25;
    let ids: Vec<String> = (0..12).map(|i| format!("K{:05}", i)).collect();
    let samples: Vec<String> = (0..5).map(|i| format!("sample_{}", i)).collect();
    let expected = ObservationTable::from_rows(ids, samples, &expected_rows).unwrap();

    let strict = EvaluationConfig::from_yaml("presence_policy: reject\n").unwrap();
    let result = evaluate_dataset(&observed, &expected, &strict);
    assert!(matches!(result, Err(EvalError::InvalidArgument(_))));

    let lenient = evaluate_dataset(&observed, &expected, &EvaluationConfig::default()).unwrap();
    assert_eq!(lenient.presence.unclassified, 1);
    assert_eq!(lenient.presence.total(), 60);

    let (obs, exp): (Vec<f64>, Vec<f64>) = lenient.scatter_points.iter().copied().unzip();
    let trials = vec![
        PairedSample::new(obs, exp.clone()).unwrap(),
        PairedSample::new(exp.clone(), exp).unwrap(),
    ];
    assert!(roc_analysis(&trials, &EvaluationConfig::default()).is_ok());
    assert!(matches!(
        roc_analysis(&trials, &strict),
        Err(EvalError::InvalidArgument(_))
    ));
}

#[test]
fn test_report_serialization() {
    let (observed, expected) = create_synthetic_tables();
    let eval = evaluate_dataset(&observed, &expected, &EvaluationConfig::default()).unwrap();

    let json = eval.to_json().unwrap();
    let parsed: DatasetEvaluation = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.overlapping_ids, eval.overlapping_ids);
    assert_eq!(parsed.n_points(), eval.n_points());

    let yaml = eval.to_yaml().unwrap();
    assert!(yaml.contains("pearson:"));
    assert!(yaml.contains("spearman:"));
    assert!(yaml.contains("presence:"));
}
