//! Stochastic sampling strategies.
//!
//! Both strategies estimate averages and variances from a subset of the
//! configuration space using the same Boltzmann weighting as exact
//! enumeration, with sums restricted to the sampled states. Neither can
//! produce a partition function; asking for one fails with `NotSupported`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::{IsingError, Result};
use crate::hamiltonian::Hamiltonian;
use crate::spins::SpinWord;
use crate::thermo::{state_count, Observable, ThermoStrategy};

/// Sample budget: a fixed number of draws, or a fraction of the 2^N
/// configuration space resolved at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage {
    Count(usize),
    Fraction(f64),
}

impl Coverage {
    /// Concrete draw count for a system of `length` sites.
    pub fn resolve(&self, length: usize) -> usize {
        match *self {
            Coverage::Count(count) => count,
            Coverage::Fraction(fraction) => {
                assert!(
                    (0.0..=1.0).contains(&fraction),
                    "coverage fraction must be in [0, 1]"
                );
                (fraction * state_count(length) as f64) as usize
            }
        }
    }
}

impl From<usize> for Coverage {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<f64> for Coverage {
    fn from(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }
}

fn sampling_rng(seed: Option<u64>) -> Pcg64 {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}

/// Uniform sampling with replacement over configuration indices.
///
/// Duplicate draws are allowed and contribute every time; the sums carry no
/// correction for them.
#[derive(Debug, Clone)]
pub struct MonteCarloStrategy {
    points: Coverage,
    seed: Option<u64>,
}

impl MonteCarloStrategy {
    pub fn new(points: impl Into<Coverage>) -> Self {
        Self {
            points: points.into(),
            seed: None,
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(points: impl Into<Coverage>, seed: u64) -> Self {
        Self {
            points: points.into(),
            seed: Some(seed),
        }
    }

    pub fn points(&self) -> Coverage {
        self.points
    }

    pub fn set_points(&mut self, points: impl Into<Coverage>) {
        self.points = points.into();
    }

    /// `(Σ w, Σ f·w, Σ f²·w)` over one batch of uniform draws.
    fn sampled_sums(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<(f64, f64, f64)> {
        let states = state_count(length);
        let draws = self.points.resolve(length);
        let mut rng = sampling_rng(self.seed);

        let mut part = 0.0;
        let mut head = 0.0;
        let mut square = 0.0;
        for _ in 0..draws {
            let config = SpinWord::new(rng.gen_range(0..states), length);
            let weight = (-hamilt.energy(&config)? / (boltzmann * temp)).exp();
            let value = func(&config)?;
            part += weight;
            head += value * weight;
            square += value * value * weight;
        }
        Ok((part, head, square))
    }
}

impl ThermoStrategy for MonteCarloStrategy {
    fn partition(
        &self,
        _hamilt: &Hamiltonian,
        _length: usize,
        _temp: f64,
        _boltzmann: f64,
    ) -> Result<f64> {
        Err(IsingError::NotSupported("the partition function"))
    }

    fn average(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let (part, head, _) = self.sampled_sums(func, hamilt, length, temp, boltzmann)?;
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
        let (part, head_sum, square_sum) =
            self.sampled_sums(func, hamilt, length, temp, boltzmann)?;
        let head = square_sum / part;
        let tail = (head_sum / part).powi(2);
        let out = head - tail;
        if out < 0.0 {
            return Err(IsingError::NegativeVariance {
                value: out,
                head,
                tail,
            });
        }
        Ok(out)
    }
}

/// Metropolis-sampled estimates.
///
/// `points` seeds independent chains (capped at the spin count) and `depth`
/// sets the rounds per chain. A round scans the bit positions in order,
/// proposing a single-spin flip at each; every proposed state contributes
/// its weighted value to the running sums before the accept decision, and
/// any acceptance ends the round. Short chains with an in-order scan make
/// this a biased estimator; the sampling scheme is part of the contract.
#[derive(Debug, Clone)]
pub struct MetropolisStrategy {
    points: usize,
    depth: usize,
    seed: Option<u64>,
}

impl MetropolisStrategy {
    pub fn new(points: usize, depth: usize) -> Self {
        Self {
            points,
            depth,
            seed: None,
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(points: usize, depth: usize, seed: u64) -> Self {
        Self {
            points,
            depth,
            seed: Some(seed),
        }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn set_points(&mut self, points: usize) {
        self.points = points;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// `(Σ w, Σ f·w, Σ f²·w)` accumulated over every visited state of every
    /// chain.
    fn chain_sums(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<(f64, f64, f64)> {
        let states = state_count(length);
        let chains = self.points.min(length);
        let mut rng = sampling_rng(self.seed);

        let mut part = 0.0;
        let mut head = 0.0;
        let mut square = 0.0;
        for _ in 0..chains {
            let mut current = SpinWord::new(rng.gen_range(0..states), length);
            let mut current_reduced = hamilt.energy(&current)? / (boltzmann * temp);

            let weight = (-current_reduced).exp();
            let value = func(&current)?;
            part += weight;
            head += value * weight;
            square += value * value * weight;

            for _ in 0..self.depth {
                for position in 0..length {
                    let mut proposed = current.copy();
                    proposed.flip(position as isize);
                    let proposed_reduced = hamilt.energy(&proposed)? / (boltzmann * temp);

                    let weight = (-proposed_reduced).exp();
                    let value = func(&proposed)?;
                    part += weight;
                    head += value * weight;
                    square += value * value * weight;

                    // Strict descent accepts outright and skips the random
                    // draw; otherwise the standard criterion applies on the
                    // reduced energies.
                    if proposed_reduced < current_reduced
                        || rng.gen::<f64>() < (current_reduced - proposed_reduced).exp()
                    {
                        current = proposed;
                        current_reduced = proposed_reduced;
                        break;
                    }
                }
            }
        }
        Ok((part, head, square))
    }
}

impl ThermoStrategy for MetropolisStrategy {
    fn partition(
        &self,
        _hamilt: &Hamiltonian,
        _length: usize,
        _temp: f64,
        _boltzmann: f64,
    ) -> Result<f64> {
        Err(IsingError::NotSupported("the partition function"))
    }

    fn average(
        &self,
        func: &Observable,
        hamilt: &Hamiltonian,
        length: usize,
        temp: f64,
        boltzmann: f64,
    ) -> Result<f64> {
        let (part, head, _) = self.chain_sums(func, hamilt, length, temp, boltzmann)?;
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
        let (part, head_sum, square_sum) =
            self.chain_sums(func, hamilt, length, temp, boltzmann)?;
        let head = square_sum / part;
        let tail = (head_sum / part).powi(2);
        let out = head - tail;
        if out < 0.0 {
            return Err(IsingError::NegativeVariance {
                value: out,
                head,
                tail,
            });
        }
        Ok(out)
    }
}
