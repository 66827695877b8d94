//! Noisy XOR classification with distractor features.
//!
//! Features 0 and 1 carry the XOR signal, the remaining ten are random.
//! Run with `RUST_LOG=tsetlin_pairwise=debug` to see per-epoch progress.

use rand::Rng;
use tracing_subscriber::EnvFilter;
use tsetlin_pairwise::{
    Config, FitOptions, TrainParams, TsetlinMachine,
    utils::{FastRng, rng_from_seed}
};

const N_FEATURES: usize = 12;

fn noisy_xor(n_samples: usize, noise: f64, rng: &mut FastRng) -> (Vec<Vec<u8>>, Vec<usize>) {
    let mut x = Vec::with_capacity(n_samples);
    let mut y = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let row: Vec<u8> = (0..N_FEATURES).map(|_| rng.random_range(0..=1)).collect();
        let mut label = usize::from(row[0] ^ row[1]);
        if rng.random::<f64>() < noise {
            label = 1 - label;
        }
        x.push(row);
        y.push(label);
    }
    (x, y)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rng_from_seed(42);
    let (x_train, y_train) = noisy_xor(5000, 0.4, &mut rng);
    let (x_test, y_test) = noisy_xor(5000, 0.0, &mut rng);

    let config = Config::builder()
        .features(N_FEATURES)
        .classes(2)
        .clauses(20)
        .states(200)
        .build()
        .expect("valid config");
    let params = TrainParams::new(15, 3.9).expect("valid params");

    let mut tm = TsetlinMachine::new(config, &mut rng).expect("allocate machine");
    println!("Initial test accuracy: {:.1}%", tm.evaluate(&x_test, &y_test) * 100.0);

    let opts = FitOptions::new(50).shuffled().on_epoch(|stats| {
        println!(
            "Epoch {:>2}: train accuracy {:.1}%, {} transitions",
            stats.epoch,
            stats.accuracy * 100.0,
            stats.feedback.total()
        );
        true
    });
    let result = tm
        .fit_with_options(&x_train, &y_train, &params, opts, &mut rng)
        .expect("valid dataset");

    println!(
        "\nTrained {} epochs, {} automaton transitions",
        result.epochs_run(),
        result.feedback().total()
    );
    println!("Test accuracy: {:.1}%", tm.evaluate(&x_test, &y_test) * 100.0);

    println!("\nLearned rules for class 1:");
    for rule in tm.rules(1).iter().filter(|r| !r.is_empty()).take(5) {
        println!("  {rule}");
    }
}
