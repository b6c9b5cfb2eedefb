//! Counts distinct words in a synthetic stream with every variant and compares
//! against the exact answer.
//!
//! Usage: `cargo run --release --example words -- [WORDS] [VARIANT...]`
use std::collections::HashSet;
use std::time::{Duration, Instant};

use loglog_estimator::{AnyEstimator, Config, EstimatorTrait, Variant};
use rand::Rng;
use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};
use tracing::{info, warn};

const DEFAULT_WORDS: usize = 1_000_000;

#[derive(Tabled)]
struct Record {
    counter: String,
    estimate: usize,
    relative_error: String,
    time: String,
}

/// Words of 1 to 8 lowercase letters, each repeated between 1 and 100 times in a row.
fn generate_words(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut words = Vec::with_capacity(count);
    while words.len() < count {
        let len = rng.gen_range(1..=8);
        let word: String = (0..len)
            .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
            .collect();
        let repeats = rng.gen_range(1..=100).min(count - words.len());
        words.extend(std::iter::repeat(word).take(repeats));
    }
    words
}

fn record(counter: &str, estimate: usize, exact: usize, time: Duration) -> Record {
    let relative_error = if exact == 0 {
        0.0
    } else {
        (estimate as f64 - exact as f64) / exact as f64
    };
    Record {
        counter: counter.to_string(),
        estimate,
        relative_error: format!("{:+.4}", relative_error),
        time: format!("{:?}", time),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let count = match args.next().map(|a| a.parse::<usize>()) {
        None => DEFAULT_WORDS,
        Some(Ok(count)) => count,
        Some(Err(e)) => {
            warn!("invalid word count: {e}, using {DEFAULT_WORDS}");
            DEFAULT_WORDS
        }
    };
    let mut variants = Vec::new();
    for arg in args {
        match arg.parse::<Variant>() {
            Ok(variant) => variants.push(variant),
            Err(e) => warn!("{e}"),
        }
    }
    if variants.is_empty() {
        variants = vec![Variant::LogLog, Variant::HyperLogLog];
    }

    let words = generate_words(count);
    info!("generated {} words", words.len());

    let start = Instant::now();
    let exact = words.iter().collect::<HashSet<_>>().len();
    let mut records = vec![record("exact", exact, exact, start.elapsed())];

    for variant in variants {
        let start = Instant::now();
        let mut estimator = AnyEstimator::new(variant, Config::default());
        for word in &words {
            estimator.insert_bytes(word.as_bytes());
        }
        let estimate = estimator.estimate();
        records.push(record(estimator.name(), estimate, exact, start.elapsed()));
    }

    let table_config = Settings::default().with(Style::markdown());
    println!("{}", Table::new(records).with(table_config));
}
