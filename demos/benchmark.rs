//! Simple benchmark comparing single-threaded and parallel axis reductions.
//!
//! Each row of a large 2-D tensor is reduced along axis 1, once inside a
//! one-thread Rayon pool and once on the global pool.

use ru_ne_stat::statistics::{mean, median, percentile, variance};
use ru_ne_stat::{Reduced, Result, TensorView};
use std::time::Instant;

fn time_reductions(tensor: &TensorView<'_>) -> Result<f64> {
    let start = Instant::now();

    let means = mean(tensor, Some(1))?;
    let _ = variance(tensor, Some(&means), Some(1))?;
    let _ = median(tensor, Some(1))?;
    let p90 = percentile(tensor, 90.0, Some(1))?;

    let duration = start.elapsed();
    if let Reduced::Tensor(values) = p90 {
        println!("   First p90: {:.6}", values[[0]]);
    }

    Ok(duration.as_secs_f64())
}

fn main() -> Result<()> {
    println!("RuNeStat Parallel Reduction Benchmark");
    println!("=====================================\n");

    let available_threads = rayon::current_num_threads();
    println!("System has {} logical CPU cores available\n", available_threads);

    let row_len = 512;
    for rows in [2_000, 10_000, 20_000] {
        let data: Vec<f64> = (0..rows * row_len).map(|i| (i as f64).sin()).collect();
        let tensor = TensorView::from_slice(&data, &[rows, row_len])?;

        println!("Testing with {} x {} elements:", rows, row_len);
        println!("-------------------------------------------");

        println!("Single thread:");
        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .map_err(|e| ru_ne_stat::RuNeStatError::ThreadPoolError(e.to_string()))?;
        let seq_time = single.install(|| time_reductions(&tensor))?;
        println!("   Duration: {:.3} seconds\n", seq_time);

        println!("Parallel ({} threads):", available_threads);
        let par_time = time_reductions(&tensor)?;
        println!("   Duration: {:.3} seconds", par_time);

        println!("   Speedup: {:.2}x\n", seq_time / par_time);
    }

    Ok(())
}
