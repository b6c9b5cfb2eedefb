use loglog_estimator::HyperLogLogEstimator;

fn main() {
    let mut estimator1 = HyperLogLogEstimator::new();
    for i in 0..1000 {
        estimator1.insert(&format!("item{}", i));
    }
    println!("estimator1 estimate = {}", estimator1.estimate());

    let mut estimator2 = HyperLogLogEstimator::new();
    for i in 1000..1500 {
        estimator2.insert(&format!("item{}", i));
    }
    println!("estimator2 estimate = {}", estimator2.estimate());

    match estimator1.merge(&estimator2) {
        Ok(()) => println!("merged estimate = {}", estimator1.estimate()),
        Err(e) => eprintln!("merge failed: {}", e),
    }
}
