use ising::graph::Graph;
use ising::hamiltonian::{
    GraphHamiltonian, Hamiltonian, MagnetSpec, OpenHamiltonian, PeriodicHamiltonian,
};
use ising::spins::SpinVector;
use ising::IsingError;

const J: f64 = -2.0;
const M: f64 = 1.1;

fn all_up() -> SpinVector {
    SpinVector::new([1, 1, 1, 1])
}

#[test]
fn test_periodic_energy() {
    let mut ham = PeriodicHamiltonian::new(1.0, 2.0);
    assert_eq!(ham.coupling(), 1.0);
    assert_eq!(ham.magnet(), 2.0);
    ham.set_coupling(J);
    ham.set_magnet(M);
    // -J·4 + M·4 with all four ring bonds aligned.
    assert!((ham.energy(&all_up()) - 12.4).abs() < 1e-12);
    let ham = Hamiltonian::from(ham);
    assert!((ham.temperature(&all_up(), 1.0).unwrap() - 12.4).abs() < 1e-12);
}

#[test]
fn test_open_energy() {
    let mut ham = OpenHamiltonian::new(1.0, 2.0);
    ham.set_coupling(J);
    ham.set_magnet(M);
    // Three bonds only: the chain does not wrap.
    assert!((ham.energy(&all_up()) - 10.4).abs() < 1e-12);
    let ham = Hamiltonian::from(ham);
    assert!((ham.temperature(&all_up(), 1.0).unwrap() - 10.4).abs() < 1e-12);
}

#[test]
fn test_graph_cycle_matches_periodic() {
    let graph = Graph::cycle(4, J);
    let periodic = PeriodicHamiltonian::new(J, M);

    let mut ham = GraphHamiltonian::new(&graph, 2.0);
    assert_eq!(*ham.magnet(), MagnetSpec::Uniform(2.0));
    ham.set_magnet(M);
    let energy = ham.energy(&all_up()).unwrap();
    assert!((energy - periodic.energy(&all_up())).abs() < 1e-12);
    assert!((energy - 12.4).abs() < 1e-12);

    // A per-site list with equal entries gives the same answer.
    ham.set_magnet(vec![M; 4]);
    assert!((ham.energy(&all_up()).unwrap() - 12.4).abs() < 1e-12);
}

#[test]
fn test_graph_directed_ring_counts_edges_once() {
    // Directed edges contribute in full, so a directed ring reproduces the
    // halved undirected cycle.
    let mut graph = Graph::with_vertices(4);
    for i in 0..4 {
        graph.add_edge(i, (i + 1) % 4, J, true);
    }
    let ham = GraphHamiltonian::new(&graph, M);
    assert!((ham.energy(&all_up()).unwrap() - 12.4).abs() < 1e-12);
}

#[test]
fn test_graph_per_site_mismatch() {
    let graph = Graph::cycle(4, J);
    let ham = GraphHamiltonian::new(&graph, vec![M; 3]);
    let err = ham.energy(&all_up()).unwrap_err();
    assert!(matches!(
        err,
        IsingError::DimensionMismatch {
            spins: 4,
            magnets: 3
        }
    ));
}
