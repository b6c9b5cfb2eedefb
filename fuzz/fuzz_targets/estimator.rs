#![no_main]

use libfuzzer_sys::fuzz_target;
use loglog_estimator::{HyperLogLogEstimator, LogLogEstimator};
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut loglog1 = LogLogEstimator::new();
    let mut hyperloglog1 = HyperLogLogEstimator::new();
    for chunk in first_half.chunks(4) {
        loglog1.insert(chunk);
        hyperloglog1.insert(chunk);
        assert!(loglog1.estimate() > 0);
        assert!(hyperloglog1.estimate() > 0);
    }

    let mut loglog2 = LogLogEstimator::new();
    let mut hyperloglog2 = HyperLogLogEstimator::new();
    for chunk in second_half.chunks(4) {
        loglog2.insert(chunk);
        hyperloglog2.insert(chunk);
    }

    loglog1.merge(&loglog2).unwrap();
    hyperloglog1.merge(&hyperloglog2).unwrap();

    let loglog: LogLogEstimator = data.chunks(4).collect();
    let hyperloglog: HyperLogLogEstimator = data.chunks(4).collect();
    assert_eq!(loglog1, loglog);
    assert_eq!(hyperloglog1, hyperloglog);
});
