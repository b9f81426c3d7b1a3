/// Solve a tridiagonal system with the Thomas algorithm.
///
/// Row `k` reads `sub[k] y[k-1] + diag[k] y[k] + sup[k] y[k+1] = rhs[k]`;
/// `sub[0]` and `sup[n-1]` are ignored.
///
/// # Returns
/// The solution vector, or the row index of a zero pivot.
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, usize> {
    let n = diag.len();
    debug_assert!(sub.len() == n && sup.len() == n && rhs.len() == n);
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_star = vec![0.0; n];
    let mut d_star = vec![0.0; n];

    if diag[0] == 0.0 {
        return Err(0);
    }
    c_star[0] = sup[0] / diag[0];
    d_star[0] = rhs[0] / diag[0];

    // Forward elimination
    for k in 1..n {
        let pivot = diag[k] - sub[k] * c_star[k - 1];
        if pivot == 0.0 {
            return Err(k);
        }
        if k + 1 < n {
            c_star[k] = sup[k] / pivot;
        }
        d_star[k] = (rhs[k] - sub[k] * d_star[k - 1]) / pivot;
    }

    // Back substitution
    let mut y = d_star;
    for k in (0..n - 1).rev() {
        y[k] -= c_star[k] * y[k + 1];
    }

    Ok(y)
}
