//! Energy models over spin configurations.
//!
//! Three interaction topologies: a periodic ring, an open chain, and an
//! arbitrary weighted graph. Strategies receive the closed [`Hamiltonian`]
//! enum and match on the variant when they need specialized handling.

use crate::error::{IsingError, Result};
use crate::graph::Graph;
use crate::spins::SpinConfig;

/// Magnetic-moment specification for the graph Hamiltonian: one shared
/// constant, or one constant per site.
#[derive(Debug, Clone, PartialEq)]
pub enum MagnetSpec {
    Uniform(f64),
    PerSite(Vec<f64>),
}

impl From<f64> for MagnetSpec {
    fn from(magnet: f64) -> Self {
        Self::Uniform(magnet)
    }
}

impl From<Vec<f64>> for MagnetSpec {
    fn from(magnets: Vec<f64>) -> Self {
        Self::PerSite(magnets)
    }
}

/// Ring topology: every site couples to its predecessor, wrap-around
/// included.
///
/// `energy = -J Σ S[i-1] S[i] + μ Σ S[i]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicHamiltonian {
    coupling: f64,
    magnet: f64,
}

impl PeriodicHamiltonian {
    pub fn new(coupling: f64, magnet: f64) -> Self {
        Self { coupling, magnet }
    }

    /// Spin coupling constant J.
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    /// Magnetic coupling constant μ.
    pub fn magnet(&self) -> f64 {
        self.magnet
    }

    pub fn set_coupling(&mut self, value: f64) {
        self.coupling = value;
    }

    pub fn set_magnet(&mut self, value: f64) {
        self.magnet = value;
    }

    pub fn energy(&self, spin: &impl SpinConfig) -> f64 {
        let n = spin.len() as isize;
        let couple: f64 = (0..n).map(|i| (spin.get(i - 1) * spin.get(i)) as f64).sum();
        let mag: f64 = (0..n).map(|i| spin.get(i) as f64).sum();
        -self.coupling * couple + self.magnet * mag
    }
}

/// Open chain: like the ring but with no wrap-around bond.
///
/// `energy = -J Σ_{i<N-1} S[i] S[i+1] + μ Σ S[i]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenHamiltonian {
    coupling: f64,
    magnet: f64,
}

impl OpenHamiltonian {
    pub fn new(coupling: f64, magnet: f64) -> Self {
        Self { coupling, magnet }
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn magnet(&self) -> f64 {
        self.magnet
    }

    pub fn set_coupling(&mut self, value: f64) {
        self.coupling = value;
    }

    pub fn set_magnet(&mut self, value: f64) {
        self.magnet = value;
    }

    pub fn energy(&self, spin: &impl SpinConfig) -> f64 {
        let n = spin.len() as isize;
        let couple: f64 = (0..n - 1)
            .map(|i| (spin.get(i) * spin.get(i + 1)) as f64)
            .sum();
        let mag: f64 = (0..n).map(|i| spin.get(i) as f64).sum();
        -self.coupling * couple + self.magnet * mag
    }
}

/// General interaction topology over a borrowed graph.
///
/// Vertex payloads hold spin indices and edge lengths hold the coupling
/// constant for their pair of sites.
#[derive(Debug, Clone)]
pub struct GraphHamiltonian<'g> {
    graph: &'g Graph,
    magnet: MagnetSpec,
}

impl<'g> GraphHamiltonian<'g> {
    pub fn new(graph: &'g Graph, magnet: impl Into<MagnetSpec>) -> Self {
        Self {
            graph,
            magnet: magnet.into(),
        }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn magnet(&self) -> &MagnetSpec {
        &self.magnet
    }

    pub fn set_magnet(&mut self, magnet: impl Into<MagnetSpec>) {
        self.magnet = magnet.into();
    }

    pub fn energy(&self, spin: &impl SpinConfig) -> Result<f64> {
        let mut couple = 0.0;
        for vert in self.graph.vertices() {
            for neighbor in self.graph.neighbors(vert.index()) {
                let far = self.graph.vertices()[neighbor.vertex].data();
                let product = (spin.get(vert.data() as isize) * spin.get(far as isize)) as f64;
                // Both endpoints enumerate an undirected edge, so halve its
                // contribution to count the pair once.
                if neighbor.undirected {
                    couple -= neighbor.weight / 2.0 * product;
                } else {
                    couple -= neighbor.weight * product;
                }
            }
        }

        let mag = match &self.magnet {
            MagnetSpec::Uniform(magnet) => {
                magnet * (0..spin.len() as isize).map(|i| spin.get(i) as f64).sum::<f64>()
            }
            MagnetSpec::PerSite(magnets) => {
                if magnets.len() != spin.len() {
                    return Err(IsingError::DimensionMismatch {
                        spins: spin.len(),
                        magnets: magnets.len(),
                    });
                }
                magnets
                    .iter()
                    .enumerate()
                    .map(|(i, magnet)| magnet * spin.get(i as isize) as f64)
                    .sum()
            }
        };
        Ok(couple + mag)
    }
}

/// Closed set of energy models.
#[derive(Debug, Clone)]
pub enum Hamiltonian<'g> {
    Periodic(PeriodicHamiltonian),
    Open(OpenHamiltonian),
    Graph(GraphHamiltonian<'g>),
}

impl<'g> Hamiltonian<'g> {
    /// Energy of a configuration under this model.
    pub fn energy(&self, spin: &impl SpinConfig) -> Result<f64> {
        match self {
            Self::Periodic(ham) => Ok(ham.energy(spin)),
            Self::Open(ham) => Ok(ham.energy(spin)),
            Self::Graph(ham) => ham.energy(spin),
        }
    }

    /// E/k for a configuration: the energy expressed in temperature units.
    pub fn temperature(&self, spin: &impl SpinConfig, boltzmann: f64) -> Result<f64> {
        Ok(self.energy(spin)? / boltzmann)
    }
}

impl<'g> From<PeriodicHamiltonian> for Hamiltonian<'g> {
    fn from(ham: PeriodicHamiltonian) -> Self {
        Self::Periodic(ham)
    }
}

impl<'g> From<OpenHamiltonian> for Hamiltonian<'g> {
    fn from(ham: OpenHamiltonian) -> Self {
        Self::Open(ham)
    }
}

impl<'g> From<GraphHamiltonian<'g>> for Hamiltonian<'g> {
    fn from(ham: GraphHamiltonian<'g>) -> Self {
        Self::Graph(ham)
    }
}
