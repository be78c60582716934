//! Equilibrium thermodynamics of finite Ising-type spin systems: exact
//! enumeration and stochastic sampling backends behind one strategy
//! interface, with a parallel temperature-sweep executor on top.

pub mod constants;
pub mod error;
pub mod graph;
pub mod hamiltonian;
pub mod montecarlo;
pub mod native;
pub mod spins;
pub mod sweep;
pub mod thermo;

pub use constants::BOLTZMANN_K;
pub use error::{IsingError, Result};
pub use hamiltonian::{
    GraphHamiltonian, Hamiltonian, MagnetSpec, OpenHamiltonian, PeriodicHamiltonian,
};
pub use spins::{SpinConfig, SpinVector, SpinWord};
pub use sweep::{SweepResult, SweepStrategy};
pub use thermo::{ExactStrategy, ThermoMethod, ThermoStrategy};
