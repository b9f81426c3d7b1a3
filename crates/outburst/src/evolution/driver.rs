//! Evolution driver.
//!
//! Each step runs in a fixed order:
//! 1. Refresh state-dependent wind coefficients
//! 2. Move the outer edge (decay phase only)
//! 3. Move the inner edge
//! 4. Solve the implicit diffusion step on a copy of the torque profile
//! 5. Commit the new profile, range and time, dropping cached observables
//!
//! Steps 2 to 4 only compute candidates; the state changes in step 5 or not
//! at all. Any failure is terminal.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info, warn};
use units::Time;

use super::truncation::{outer_edge, InnerBoundary};
use crate::config::DiskConfig;
use crate::diffusion::{BoundaryConditions, Convergence, NonlinearDiffusion};
use crate::error::EvolutionError;
use crate::state::{Commit, DiskState};
use crate::wind::Wind;

/// Life cycle of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionStatus {
    /// Built, no step taken yet
    Initialized,
    /// At least one step committed
    Stepping,
    /// A step failed at the given step index; no further steps are accepted
    Failed { step: usize },
}

/// Time evolution of a disk.
#[derive(Debug)]
pub struct Evolution {
    state: DiskState,
    wind: Wind,
    inner: InnerBoundary,
    solver: NonlinearDiffusion,
    cancel: Arc<AtomicBool>,
    status: EvolutionStatus,
}

impl Evolution {
    /// Validates `config` and builds the initial disk.
    pub fn new(config: DiskConfig) -> Result<Self, EvolutionError> {
        let state = DiskState::new(Arc::new(config))?;
        Ok(Self::with_state(state))
    }

    /// Evolves an already built disk state.
    pub fn with_state(state: DiskState) -> Self {
        let config = state.shared_config();
        let cancel = Arc::new(AtomicBool::new(false));
        let solver = NonlinearDiffusion::new(config.calculation.eps, config.calculation.max_iterations)
            .with_cancel_flag(Arc::clone(&cancel));
        let wind = Wind::new(config.wind, &state);
        let inner = InnerBoundary::from_config(&config);

        info!(
            "disk evolution: {} points, R = [{:.4e}, {:.4e}] cm, {} opacity, wind {:?}, {} inner boundary",
            state.nx(),
            state.r()[0],
            state.r()[state.nx() - 1],
            config.disk.opacity,
            config.wind,
            match inner {
                InnerBoundary::Fixed => "fixed",
                InnerBoundary::Magnetosphere(_) => "magnetospheric",
            }
        );

        Self {
            state,
            wind,
            inner,
            solver,
            cancel,
            status: EvolutionStatus::Initialized,
        }
    }

    pub fn state(&self) -> &DiskState {
        &self.state
    }

    pub fn status(&self) -> EvolutionStatus {
        self.status
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    pub fn inner_boundary(&self) -> &InnerBoundary {
        &self.inner
    }

    /// Flag that aborts a running diffusion solve once set, from any thread.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Advances by the configured time step.
    pub fn step(&mut self) -> Result<Convergence, EvolutionError> {
        let tau = self.state.config().calculation.tau;
        self.step_by(tau)
    }

    /// Advances by `tau`.
    pub fn step_by(&mut self, tau: Time) -> Result<Convergence, EvolutionError> {
        if let EvolutionStatus::Failed { step } = self.status {
            return Err(EvolutionError::Terminated { step });
        }
        match self.advance(tau.to_seconds()) {
            Ok(convergence) => {
                self.status = EvolutionStatus::Stepping;
                Ok(convergence)
            }
            Err(err) => {
                self.status = EvolutionStatus::Failed {
                    step: self.state.i_t(),
                };
                Err(err)
            }
        }
    }

    fn advance(&mut self, tau: f64) -> Result<Convergence, EvolutionError> {
        let step = self.state.i_t();
        let time = self.state.t();
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(EvolutionError::InvalidTimeStep { step, time, tau });
        }

        self.wind.update(&self.state);

        let last = outer_edge(&self.state);
        if last != self.state.last() {
            warn!(
                "step {}: outer edge moves from {:.4e} to {:.4e} cm",
                step,
                self.state.r()[self.state.last()],
                self.state.r()[last]
            );
        }
        let edge = self.inner.inner_edge(&self.state, last);
        if last < edge.first + 2 {
            return Err(EvolutionError::DegenerateGrid {
                step,
                time,
                points: (last + 1).saturating_sub(edge.first),
            });
        }

        let bc = BoundaryConditions {
            inner_value: edge.f_in,
            outer_slope: self.state.mdot_out(),
        };
        let structure = self.state.structure();
        let wunc = |h: &[f64], f: &[f64], first: usize, last: usize| structure.w_range(h, f, first, last);
        let mut f = self.state.f().to_vec();
        let h = self.state.h();

        let solved = if self.wind.is_active() {
            let terms = self.wind.coefficients().as_terms();
            self.solver
                .solve_with_wind(tau, bc, terms, wunc, h, &mut f, edge.first, last)
        } else {
            self.solver.solve(tau, bc, wunc, h, &mut f, edge.first, last)
        };
        let convergence =
            solved.map_err(|source| EvolutionError::Diffusion { step, time, source })?;

        self.state.commit(Commit {
            f,
            first: edge.first,
            last,
            f_in: edge.f_in,
            tau,
        });
        debug!(
            "step {}: t = {:.4e} s, Mdot_in = {:.4e} g/s, range [{}, {}], {} iterations",
            step + 1,
            self.state.t(),
            self.state.mdot_in(),
            edge.first,
            last,
            convergence.iterations
        );
        Ok(convergence)
    }

    /// Runs the configured number of steps, handing the state to `dump`
    /// before each one.
    pub fn run<D>(&mut self, mut dump: D) -> Result<(), EvolutionError>
    where
        D: FnMut(&DiskState),
    {
        let steps = self.state.config().calculation.steps();
        for _ in 0..=steps {
            dump(&self.state);
            self.step()?;
        }
        Ok(())
    }
}
