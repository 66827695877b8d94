//! Integration tests for Tsetlin Machine.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering}
};

use tsetlin_pairwise::{
    Config, Error, FitOptions, Polarity, TrainParams, TsetlinMachine,
    utils::{argmax, rng_from_seed}
};

fn xor_data() -> (Vec<Vec<u8>>, Vec<usize>) {
    let x = vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]];
    let y = vec![0, 1, 1, 0];
    (x, y)
}

/// One indicator bit per class followed by three noise bits, every noise
/// combination present.
fn indicator_data() -> (Vec<Vec<u8>>, Vec<usize>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for class in 0..3 {
        for noise in 0u8..8 {
            let mut row = vec![0u8; 6];
            row[class] = 1;
            for bit in 0..3 {
                row[3 + bit] = (noise >> bit) & 1;
            }
            x.push(row);
            y.push(class);
        }
    }
    (x, y)
}

fn machine(n_features: usize, n_classes: usize, n_clauses: usize, seed: u64) -> TsetlinMachine {
    let config = Config::builder()
        .features(n_features)
        .classes(n_classes)
        .clauses(n_clauses)
        .states(100)
        .build()
        .unwrap();
    TsetlinMachine::new(config, &mut rng_from_seed(seed)).unwrap()
}

fn all_states(tm: &TsetlinMachine) -> Vec<Vec<i16>> {
    let half = tm.config().half_clauses();
    let mut states = Vec::new();
    for class in 0..tm.n_classes() {
        for polarity in [Polarity::Positive, Polarity::Negative] {
            for slot in 0..half {
                states.push(tm.clause(class, polarity, slot).get_state());
            }
        }
    }
    states
}

#[test]
fn forced_states_scenario() {
    let config = Config::builder()
        .features(2)
        .classes(2)
        .clauses(2)
        .states(10)
        .build()
        .unwrap();
    let mut tm = TsetlinMachine::new(config, &mut rng_from_seed(1)).unwrap();

    // plain x0 at 6, negated x1 at 7, everything else excluded
    let clause = tm.clause_mut(0, Polarity::Positive, 0);
    clause.set_state(&[6, 1, 1, 7], None);

    assert!(clause.evaluate(&[1, 0]));
    assert!(!clause.evaluate(&[1, 1]));
}

#[test]
fn argmax_ties_pick_lowest_class() {
    assert_eq!(argmax(&[3, 3, 1]), 0);
}

#[test]
fn construction_errors() {
    let odd = Config {
        n_features: 4,
        n_classes:  2,
        n_clauses:  3,
        n_states:   10
    };
    assert_eq!(
        TsetlinMachine::new(odd, &mut rng_from_seed(1)).unwrap_err(),
        Error::OddClauses
    );

    let odd_states = Config {
        n_states: 11,
        n_clauses: 4,
        ..odd
    };
    assert_eq!(
        TsetlinMachine::new(odd_states, &mut rng_from_seed(1)).unwrap_err(),
        Error::OddStates
    );
}

#[test]
fn steps_are_reproducible() {
    let (x, y) = indicator_data();
    let params = TrainParams::new(8, 3.0).unwrap();

    let run = |seed: u64| {
        let mut rng = rng_from_seed(seed);
        let config = Config::builder()
            .features(6)
            .classes(3)
            .clauses(10)
            .states(20)
            .build()
            .unwrap();
        let mut tm = TsetlinMachine::new(config, &mut rng).unwrap();
        let counters: Vec<_> = x
            .iter()
            .zip(&y)
            .cycle()
            .take(120)
            .map(|(xi, &yi)| tm.step(xi, yi, &params, &mut rng))
            .collect();
        (counters, all_states(&tm))
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn thresholded_steps_are_reproducible() {
    let (x, y) = indicator_data();
    let params = TrainParams::new(8, 3.0).unwrap().with_threshold(3).unwrap();

    let run = || {
        let mut rng = rng_from_seed(7);
        let mut tm = machine(6, 3, 10, 0);
        let total = tm.fit(&x, &y, &params, 5, &mut rng);
        (total, all_states(&tm))
    };

    assert_eq!(run(), run());
}

#[test]
fn learns_indicator_classes() {
    let (x, y) = indicator_data();
    let mut rng = rng_from_seed(42);
    let mut tm = machine(6, 3, 20, 42);
    let params = TrainParams::new(10, 3.0).unwrap();

    let result = tm
        .fit_with_options(&x, &y, &params, FitOptions::new(60).shuffled(), &mut rng)
        .unwrap();

    assert_eq!(result.epochs_run(), 60);
    assert!(!result.stopped_early);
    assert!(result.feedback().total() > 0);
    assert!(result.epochs.iter().enumerate().all(|(i, e)| e.epoch == i + 1));
    assert!(tm.evaluate(&x, &y) >= 0.75);
}

#[test]
fn xor_two_classes() {
    let (x, y) = xor_data();
    let mut rng = rng_from_seed(42);
    let mut tm = machine(2, 2, 20, 42);
    let params = TrainParams::new(10, 3.9).unwrap();

    let feedback = tm.fit(&x, &y, &params, 200, &mut rng);

    assert!(feedback.target_type_i > 0);
    assert!(tm.evaluate(&x, &y) >= 0.75);
}

#[test]
fn plateau_stops_training() {
    let (x, y) = xor_data();
    let mut rng = rng_from_seed(42);
    let mut tm = machine(2, 2, 20, 42);
    let params = TrainParams::new(10, 3.9).unwrap();
    let opts = FitOptions::new(1000).stop_on_plateau(10, 0.01);

    let result = tm.fit_with_options(&x, &y, &params, opts, &mut rng).unwrap();

    // accuracy on four examples moves in quarters, so it settles long before 1000
    assert!(result.stopped_early);
    assert!(result.epochs_run() < 1000);
    assert_eq!(result.final_accuracy(), Some(tm.evaluate(&x, &y)));
}

#[test]
fn callback_stops_training() {
    let (x, y) = xor_data();
    let mut rng = rng_from_seed(1);
    let mut tm = machine(2, 2, 10, 1);
    let params = TrainParams::new(5, 3.0).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let opts = FitOptions::new(100).on_epoch(move |stats| {
        seen.fetch_add(1, Ordering::SeqCst);
        assert!((0.0..=1.0).contains(&stats.accuracy));
        stats.epoch < 3
    });

    let result = tm.fit_with_options(&x, &y, &params, opts, &mut rng).unwrap();

    assert_eq!(result.epochs_run(), 3);
    assert!(result.stopped_early);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn rule_extraction() {
    let (x, y) = indicator_data();
    let mut rng = rng_from_seed(3);
    let mut tm = machine(6, 3, 10, 3);
    let params = TrainParams::new(10, 3.0).unwrap();

    tm.fit(&x, &y, &params, 30, &mut rng);

    for class in 0..3 {
        let rules = tm.rules(class);
        assert_eq!(rules.len(), 10);
        assert_eq!(
            rules.iter().filter(|r| r.polarity == Polarity::Positive).count(),
            5
        );
        for (slot, rule) in rules.iter().take(5).enumerate() {
            let clause = tm.clause(class, Polarity::Positive, slot);
            for xi in &x {
                assert_eq!(rule.matches(xi), clause.evaluate(xi));
            }
        }
    }
}

#[test]
fn predict_batch_matches_predict() {
    let (x, _) = indicator_data();
    let tm = machine(6, 3, 10, 9);

    let batch = tm.predict_batch(&x);

    assert_eq!(batch.len(), x.len());
    for (xi, &p) in x.iter().zip(&batch) {
        assert_eq!(tm.predict(xi), p);
        let (class, votes) = tm.predict_with_votes(xi);
        assert_eq!(class, p);
        assert_eq!(votes.len(), 3);
    }
}
