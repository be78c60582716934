//! Thermodynamic calculation strategies and the orchestrator.
//!
//! A [`ThermoStrategy`] turns a Hamiltonian plus `(N, T, k)` into the
//! partition function and Boltzmann-weighted averages and variances of
//! arbitrary observables. [`ThermoMethod`] holds the active strategy and
//! derives the physical quantities from those primitives.

use crate::error::{IsingError, Result};
use crate::hamiltonian::Hamiltonian;
use crate::spins::{SpinConfig, SpinWord};

/// Observable evaluated per configuration inside the weighted sums.
pub type Observable<'a> = dyn Fn(&SpinWord) -> Result<f64> + Sync + 'a;

/// Number of configurations of an N-site system. Lengths of 64 or more
/// overflow the packed representation.
pub(crate) fn state_count(length: usize) -> u64 {
    assert!(length >= 1 && length < 64, "length must be in 1..=63");
    1u64 << length
}

/// A calculation backend.
///
/// Strategy configuration is read-only shared state while calculations are
/// in flight: configure an instance before handing it to a sweep, not
/// during one.
pub trait ThermoStrategy: Send + Sync {
    /// Partition function `Z = Σ_c exp(-E(c) / kT)`.
    fn partition(&self, hamilt: &Hamiltonian, length: usize, temp: f64, boltzmann: f64)
        -> Result<f64>;

    /// Boltzmann-weighted average of `func` over the configuration space.
    fn average(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64>;

    /// Weighted variance `E[f²] - E[f]²` of `func`.
    fn variance(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64>;
}

/// Exact enumeration over all 2^N configurations.
///
/// O(2^N) per call, which bounds practical lengths to a few tens of sites
/// and is what the sampling strategies exist to avoid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactStrategy;

impl ExactStrategy {
    /// One enumeration pass: `(Z, Σ f·w, Σ f²·w)`.
    fn weighted_sums(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<(f64, f64, f64)> {
        let mut part = 0.0;
        let mut head = 0.0;
        let mut square = 0.0;
        for sp in 0..state_count(length) {
            let config = SpinWord::new(sp, length);
            let weight = (-hamilt.energy(&config)? / (boltzmann * temp)).exp();
            let value = func(&config)?;
            part += weight;
            head += value * weight;
            square += value * value * weight;
        }
        Ok((part, head, square))
    }
}

impl ThermoStrategy for ExactStrategy {
    fn partition(
        &self,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let mut part = 0.0;
        for sp in 0..state_count(length) {
            let config = SpinWord::new(sp, length);
            part += (-hamilt.energy(&config)? / (boltzmann * temp)).exp();
        }
        Ok(part)
    }

    fn average(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let (part, head, _) = self.weighted_sums(func, hamilt, length, temp, boltzmann)?;
        Ok(head / part)
    }

    fn variance(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let (part, head_sum, square_sum) = self.weighted_sums(func, hamilt, length, temp, boltzmann)?;
        let head = square_sum / part;
        let tail = (head_sum / part).powi(2);
        let out = head - tail;
        if out < 0.0 {
            // Cancellation this bad is a numerical-stability signal the
            // caller needs to see, not something to clamp away.
            return Err(IsingError::NegativeVariance {
                value: out,
                head,
                tail,
            });
        }
        Ok(out)
    }
}

/// Orchestrator: holds the active strategy and derives energy, heat
/// capacity, and magnetic susceptibility from its averages and variances.
pub struct ThermoMethod {
    strat: Box<dyn ThermoStrategy>,
}

impl Default for ThermoMethod {
    fn default() -> Self {
        Self::new(Box::new(ExactStrategy))
    }
}

impl ThermoMethod {
    pub fn new(strat: Box<dyn ThermoStrategy>) -> Self {
        Self { strat }
    }

    /// Swap the active strategy. Affects every subsequent call on this
    /// orchestrator; never swap while a sweep is in flight.
    pub fn set_strategy(&mut self, strat: Box<dyn ThermoStrategy>) {
        self.strat = strat;
    }

    pub fn strategy(&self) -> &dyn ThermoStrategy {
        self.strat.as_ref()
    }

    pub fn partition(
        &self,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        self.strat.partition(hamilt, length, temp, boltzmann)
    }

    pub fn average(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        self.strat.average(func, hamilt, length, temp, boltzmann)
    }

    pub fn variance(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        self.strat.variance(func, hamilt, length, temp, boltzmann)
    }

    /// Mean energy at a temperature.
    pub fn energy(
        &self,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        self.strat
            .average(&|sp| hamilt.energy(sp), hamilt, length, temp, boltzmann)
    }

    /// Energy variance normalized by kT².
    pub fn heat_capacity(
        &self,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let var = self
            .strat
            .variance(&|sp| hamilt.energy(sp), hamilt, length, temp, boltzmann)?;
        Ok(var / (boltzmann * temp * temp))
    }

    /// Magnetization variance normalized by kT.
    pub fn magnetic_susceptibility(
        &self,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let var = self.strat.variance(
            &|sp| Ok(sp.magnetization() as f64),
            hamilt,
            length,
            temp,
            boltzmann,
        )?;
        Ok(var / (boltzmann * temp))
    }
}
