use crate::error::{MannWhitneyError, Result};

// Indices of `values` in ascending value order. Ties keep their input order.
fn ascending_order(values: &[f64]) -> Result<Vec<usize>> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MannWhitneyError::NonFiniteSample);
    }
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&x, &y| values[x].total_cmp(&values[y]));
    Ok(order)
}

// Calls `visit(start, end)` for every run of equal values in `order`.
fn for_each_tie_group(values: &[f64], order: &[usize], mut visit: impl FnMut(usize, usize)) {
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && values[order[j]] == values[order[i]] {
            j += 1;
        }
        visit(i, j);
        i = j;
    }
}

/// Ranks `values` from 1 to n, returned in input order.
///
/// Equal values share the mean of the ranks they would occupy if they were
/// distinct, so `[10, 20, 20, 30]` ranks as `[1, 2.5, 2.5, 4]`.
pub fn average_ranks(values: &[f64]) -> Result<Vec<f64>> {
    let order = ascending_order(values)?;
    let mut ranks = vec![0.0; values.len()];
    for_each_tie_group(values, &order, |start, end| {
        let rank_val = (start + end + 1) as f64 / 2.0;
        for &k in &order[start..end] {
            ranks[k] = rank_val;
        }
    });
    Ok(ranks)
}

/// Tie correction factor `1 - Σ(t³ - t) / (n³ - n)` over every group of `t`
/// equal values.
///
/// Returns 1.0 when there are no ties (or fewer than two values) and 0.0 when
/// every value is identical.
pub fn tie_correction(values: &[f64]) -> Result<f64> {
    let n = values.len();
    if n < 2 {
        return Ok(1.0);
    }
    let order = ascending_order(values)?;
    let mut ties = 0.0;
    for_each_tie_group(values, &order, |start, end| {
        let t = (end - start) as f64;
        ties += t * t * t - t;
    });
    let n = n as f64;
    Ok(1.0 - ties / (n * n * n - n))
}
