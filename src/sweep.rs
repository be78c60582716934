//! Temperature-sweep execution.
//!
//! A sweep turns a batch of temperatures into three arrays (energy, heat
//! capacity, magnetic susceptibility) index-aligned to the input, either
//! sequentially or fanned over a bounded worker pool. Any per-temperature
//! failure fails the whole sweep; there are no partial results.

use rayon::prelude::*;

use crate::error::Result;
use crate::hamiltonian::Hamiltonian;
use crate::native;
use crate::thermo::ThermoMethod;

/// Worker count used when the caller does not pick one.
pub fn default_threads() -> usize {
    32.max(4 + rayon::current_num_threads())
}

/// Per-temperature observables of a sweep, index-aligned with the input
/// temperature sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    pub energies: Vec<f64>,
    pub heat_capacities: Vec<f64>,
    pub susceptibilities: Vec<f64>,
}

impl SweepResult {
    pub(crate) fn from_rows(rows: Vec<(f64, f64, f64)>) -> Self {
        let mut out = Self {
            energies: Vec::with_capacity(rows.len()),
            heat_capacities: Vec::with_capacity(rows.len()),
            susceptibilities: Vec::with_capacity(rows.len()),
        };
        for (energy, heat, sus) in rows {
            out.energies.push(energy);
            out.heat_capacities.push(heat);
            out.susceptibilities.push(sus);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// How a batch of temperatures is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStrategy {
    /// One temperature after another on the calling thread.
    Sequential,
    /// Fan per-temperature calculations over a bounded worker pool. Output
    /// order follows the input order regardless of completion order.
    Threaded { threads: usize },
    /// Fused native kernel for periodic Hamiltonians; every other variant
    /// falls back to the threaded executor.
    Native { threads: usize },
}

impl SweepStrategy {
    /// Compute the three observables at every temperature in `temps`.
    pub fn sweep(
        &self,
        method: &ThermoMethod,
        hamilt: &Hamiltonian,
        length: usize,
        temps: &[f64],
        boltzmann: f64,
    ) -> Result<SweepResult> {
        match *self {
            SweepStrategy::Sequential => {
                let mut rows = Vec::with_capacity(temps.len());
                for &temp in temps {
                    rows.push(Self::point(method, hamilt, length, temp, boltzmann)?);
                }
                Ok(SweepResult::from_rows(rows))
            }
            SweepStrategy::Threaded { threads } => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                let rows = pool.install(|| {
                    temps
                        .par_iter()
                        .map(|&temp| Self::point(method, hamilt, length, temp, boltzmann))
                        .collect::<Result<Vec<_>>>()
                })?;
                Ok(SweepResult::from_rows(rows))
            }
            SweepStrategy::Native { threads } => match hamilt {
                Hamiltonian::Periodic(ham) => native::plot_vals(
                    length,
                    ham.coupling(),
                    ham.magnet(),
                    temps,
                    boltzmann,
                    threads,
                ),
                _ => SweepStrategy::Threaded { threads }
                    .sweep(method, hamilt, length, temps, boltzmann),
            },
        }
    }

    fn point(
        method: &ThermoMethod,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<(f64, f64, f64)> {
        Ok((
            method.energy(hamilt, length, temp, boltzmann)?,
            method.heat_capacity(hamilt, length, temp, boltzmann)?,
            method.magnetic_susceptibility(hamilt, length, temp, boltzmann)?,
        ))
    }
}
