use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{trace, warn};

use super::tridiagonal::solve_tridiagonal;
use crate::error::DiffusionError;

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Boundary values for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConditions {
    /// Dirichlet value: `y[first]` at the new time level
    pub inner_value: f64,
    /// Neumann value: `(y[last] - y[last-1]) / (x[last] - x[last-1])` at the new time level
    pub outer_slope: f64,
}

/// Additive wind terms of `∂w/∂t = ∂²y/∂x² + A w + B y + C`.
///
/// Arrays are indexed like the grid (full length, not the active range).
#[derive(Debug, Clone, Copy)]
pub struct WindTerms<'a> {
    pub a: &'a [f64],
    pub b: &'a [f64],
    pub c: &'a [f64],
}

/// Diagnostics of a converged solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// Number of linear solves performed
    pub iterations: usize,
    /// Mean-square relative change of `w` in the last iteration
    pub error: f64,
    /// Maximum relative change of `w` in the last iteration
    pub max_relative_change: f64,
}

/// Backward-Euler nonlinear diffusion solver.
///
/// The closure `w(x, y, first, last)` receives the full grid and field and
/// must return `last - first + 1` values, one per active point. It is called
/// once per iteration and must be free of side effects.
#[derive(Debug, Clone)]
pub struct NonlinearDiffusion {
    /// Convergence threshold on the mean-square relative change of `w`
    pub eps: f64,
    /// Iterations allowed before the solve is declared non-convergent
    pub max_iterations: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl NonlinearDiffusion {
    pub fn new(eps: f64, max_iterations: usize) -> Self {
        Self {
            eps,
            max_iterations,
            cancel: None,
        }
    }

    /// Attach a flag that aborts the iteration loop once set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Advance `y` by one step `tau` without wind terms.
    ///
    /// On success `y[first..=last]` holds the new time level; on failure `y`
    /// is left untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn solve<W>(
        &self,
        tau: f64,
        bc: BoundaryConditions,
        wunc: W,
        x: &[f64],
        y: &mut [f64],
        first: usize,
        last: usize,
    ) -> Result<Convergence, DiffusionError>
    where
        W: Fn(&[f64], &[f64], usize, usize) -> Vec<f64>,
    {
        self.iterate(tau, bc, None, wunc, x, y, first, last)
    }

    /// Advance `y` by one step `tau` including the wind terms `A`, `B`, `C`.
    #[allow(clippy::too_many_arguments)]
    pub fn solve_with_wind<W>(
        &self,
        tau: f64,
        bc: BoundaryConditions,
        wind: WindTerms<'_>,
        wunc: W,
        x: &[f64],
        y: &mut [f64],
        first: usize,
        last: usize,
    ) -> Result<Convergence, DiffusionError>
    where
        W: Fn(&[f64], &[f64], usize, usize) -> Vec<f64>,
    {
        for (name, values) in [("A", wind.a), ("B", wind.b), ("C", wind.c)] {
            if values.len() != x.len() {
                return Err(DiffusionError::LengthMismatch {
                    name,
                    expected: x.len(),
                    actual: values.len(),
                });
            }
        }
        self.iterate(tau, bc, Some(wind), wunc, x, y, first, last)
    }

    #[allow(clippy::too_many_arguments)]
    fn iterate<W>(
        &self,
        tau: f64,
        bc: BoundaryConditions,
        wind: Option<WindTerms<'_>>,
        wunc: W,
        x: &[f64],
        y: &mut [f64],
        first: usize,
        last: usize,
    ) -> Result<Convergence, DiffusionError>
    where
        W: Fn(&[f64], &[f64], usize, usize) -> Vec<f64>,
    {
        if !(tau.is_finite() && tau > 0.0) {
            return Err(DiffusionError::InvalidTimeStep(tau));
        }
        if y.len() != x.len() {
            return Err(DiffusionError::LengthMismatch {
                name: "field",
                expected: x.len(),
                actual: y.len(),
            });
        }
        if last >= x.len() || last < first + 2 {
            return Err(DiffusionError::GridTooSmall { first, last });
        }
        if !bc.inner_value.is_finite() {
            return Err(DiffusionError::NonFinite {
                stage: "inner boundary",
                index: first,
            });
        }
        if !bc.outer_slope.is_finite() {
            return Err(DiffusionError::NonFinite {
                stage: "outer boundary",
                index: last,
            });
        }

        let n = last - first + 1;
        let w_prev = evaluate(&wunc, x, y, first, last)?;
        let mut guess = y.to_vec();
        let mut w = w_prev.clone();

        let mut sub = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut sup = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        let mut error = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            if self.is_cancelled() {
                warn!("diffusion solve cancelled after {} iterations", iteration - 1);
                return Err(DiffusionError::Cancelled(iteration - 1));
            }

            diag[0] = 1.0;
            sup[0] = 0.0;
            rhs[0] = bc.inner_value;

            for k in 1..n - 1 {
                let i = first + k;
                let a = 1.0 / (x[i] - x[i - 1]);
                let c = 1.0 / (x[i + 1] - x[i]);
                let dx = 0.5 * (x[i + 1] - x[i - 1]);
                let k_i = if guess[i] != 0.0 { w[k] / guess[i] } else { 0.0 };

                sub[k] = a;
                sup[k] = c;
                diag[k] = -a - c - dx * k_i / tau;
                rhs[k] = -dx * w_prev[k] / tau;

                if let Some(terms) = &wind {
                    diag[k] += dx * (terms.a[i] * k_i + terms.b[i]);
                    rhs[k] -= dx * terms.c[i];
                }

                if !(diag[k].is_finite() && rhs[k].is_finite()) {
                    return Err(DiffusionError::NonFinite {
                        stage: "stencil",
                        index: i,
                    });
                }
            }

            sub[n - 1] = -1.0;
            diag[n - 1] = 1.0;
            rhs[n - 1] = bc.outer_slope * (x[last] - x[last - 1]);

            let solution = solve_tridiagonal(&sub, &diag, &sup, &rhs)
                .map_err(|k| DiffusionError::ZeroPivot(first + k))?;
            if let Some(k) = solution.iter().position(|v| !v.is_finite()) {
                return Err(DiffusionError::NonFinite {
                    stage: "tridiagonal solution",
                    index: first + k,
                });
            }
            guess[first..=last].copy_from_slice(&solution);

            let w_next = evaluate(&wunc, x, &guess, first, last)?;
            error = mean_square_rel(&w_next, &w);
            let max_relative_change = max_dif_rel(&w_next, &w);
            trace!(
                "iteration {}: mean-square rel {:.3e}, max rel {:.3e}",
                iteration,
                error,
                max_relative_change
            );
            w = w_next;

            if error < self.eps {
                y[first..=last].copy_from_slice(&guess[first..=last]);
                return Ok(Convergence {
                    iterations: iteration,
                    error,
                    max_relative_change,
                });
            }
        }

        Err(DiffusionError::NotConverged {
            iterations: self.max_iterations,
            error,
        })
    }
}

impl Default for NonlinearDiffusion {
    fn default() -> Self {
        Self::new(1e-6, DEFAULT_MAX_ITERATIONS)
    }
}

fn evaluate<W>(
    wunc: &W,
    x: &[f64],
    y: &[f64],
    first: usize,
    last: usize,
) -> Result<Vec<f64>, DiffusionError>
where
    W: Fn(&[f64], &[f64], usize, usize) -> Vec<f64>,
{
    let w = wunc(x, y, first, last);
    let expected = last - first + 1;
    if w.len() != expected {
        return Err(DiffusionError::ClosureLength {
            expected,
            actual: w.len(),
        });
    }
    if let Some(k) = w.iter().position(|v| !v.is_finite()) {
        return Err(DiffusionError::NonFinite {
            stage: "closure",
            index: first + k,
        });
    }
    Ok(w)
}

/// Relative difference of two values, zero when both vanish.
fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Root-mean-square of the pointwise relative differences of `a` and `b`.
pub fn mean_square_rel(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&a, &b)| relative_difference(a, b).powi(2))
        .sum();
    (sum / a.len() as f64).sqrt()
}

/// Largest pointwise relative difference of `a` and `b`.
pub fn max_dif_rel(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&a, &b)| relative_difference(a, b))
        .fold(0.0, f64::max)
}
