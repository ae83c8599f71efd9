use std::path::Path;

use mann_whitney_exact::{mann_whitney_exact, Alternative, Result, TableStore};
use rand::Rng;

// Two random samples drawn from overlapping ranges, tested under every
// alternative against the tables in `table_path`.
pub fn compare_random_samples(table_path: &Path, size: usize) -> Result<()> {
    let store = TableStore::load(table_path)?;

    let mut rng = rand::thread_rng();
    let a: Vec<f64> = (0..size).map(|_| rng.gen_range(20..=80) as f64).collect();
    let b: Vec<f64> = (0..size).map(|_| rng.gen_range(40..=100) as f64).collect();
    println!("Samples: {:?} {:?}", a, b);

    for alternative in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
        let result = mann_whitney_exact(&store, &a, &b, alternative)?;
        println!(
            "Mann-Whitney {}: U = {}, p = {}",
            alternative, result.u_statistic, result.p_value
        );
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
