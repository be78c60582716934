use ising::hamiltonian::{Hamiltonian, OpenHamiltonian, PeriodicHamiltonian};
use ising::native::{self, NativeStrategy};
use ising::spins::{SpinConfig, SpinWord};
use ising::thermo::{ExactStrategy, ThermoMethod, ThermoStrategy};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const J: f64 = -2.0;
const M: f64 = 1.1;

#[test]
fn test_scalar_kernels_match_managed() {
    let length = 8;
    let ham = PeriodicHamiltonian::new(J, M);
    for config in 0..(1u64 << length) {
        let word = SpinWord::new(config, length);
        assert_eq!(
            native::magnetization(config, length),
            word.magnetization(),
            "config {config:b}"
        );
        let managed = ham.energy(&word);
        let fast = native::energy(config, length, J, M);
        assert!((managed - fast).abs() < 1e-9, "config {config:b}");
    }
}

#[test]
fn test_scalar_kernels_random_wide_configs() {
    // Past exhaustive range: spot-check wider words with a deterministic RNG.
    let mut rng = ChaCha20Rng::seed_from_u64(0xDEADBEEF);
    let length = 20;
    let ham = PeriodicHamiltonian::new(J, M);
    for _ in 0..200 {
        let config = rng.gen_range(0..(1u64 << length));
        let word = SpinWord::new(config, length);
        assert_eq!(native::magnetization(config, length), word.magnetization());
        assert!((native::energy(config, length, J, M) - ham.energy(&word)).abs() < 1e-9);
    }
}

#[test]
fn test_native_matches_exact() {
    let ham = Hamiltonian::Periodic(PeriodicHamiltonian::new(J, M));
    let exact = ThermoMethod::new(Box::new(ExactStrategy));
    let fast = ThermoMethod::new(Box::new(NativeStrategy::new(4)));
    let length = 8;

    for &temp in &[0.5, 1.0, 2.0, 10.0] {
        let a = exact.energy(&ham, length, temp, 1.0).unwrap();
        let b = fast.energy(&ham, length, temp, 1.0).unwrap();
        assert!((a - b).abs() < 1e-4, "energy at T={temp}");

        let a = exact.heat_capacity(&ham, length, temp, 1.0).unwrap();
        let b = fast.heat_capacity(&ham, length, temp, 1.0).unwrap();
        assert!((a - b).abs() < 1e-4, "heat capacity at T={temp}");

        let a = exact.magnetic_susceptibility(&ham, length, temp, 1.0).unwrap();
        let b = fast.magnetic_susceptibility(&ham, length, temp, 1.0).unwrap();
        assert!((a - b).abs() < 1e-4, "susceptibility at T={temp}");

        let a = exact.partition(&ham, length, temp, 1.0).unwrap();
        let b = fast.partition(&ham, length, temp, 1.0).unwrap();
        assert!(((a - b) / a).abs() < 1e-9, "partition at T={temp}");
    }
}

#[test]
fn test_native_falls_back_for_open_chains() {
    let ham = Hamiltonian::Open(OpenHamiltonian::new(J, M));
    let exact = ExactStrategy.partition(&ham, 6, 1.0, 1.0).unwrap();
    let fast = NativeStrategy::new(2)
        .partition(&ham, 6, 1.0, 1.0)
        .unwrap();
    assert!(((exact - fast) / exact).abs() < 1e-12);

    let method = ThermoMethod::new(Box::new(NativeStrategy::new(2)));
    let exact_method = ThermoMethod::default();
    let a = exact_method.energy(&ham, 6, 1.0, 1.0).unwrap();
    let b = method.energy(&ham, 6, 1.0, 1.0).unwrap();
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn test_plot_vals_alignment() {
    let temps = [5.0, 1.0, 3.0];
    let length = 6;
    let out = native::plot_vals(length, J, M, &temps, 1.0, 2).unwrap();
    assert_eq!(out.energies.len(), temps.len());
    assert_eq!(out.heat_capacities.len(), temps.len());
    assert_eq!(out.susceptibilities.len(), temps.len());

    // Row i corresponds to temps[i], not to completion order.
    let ham = Hamiltonian::Periodic(PeriodicHamiltonian::new(J, M));
    let method = ThermoMethod::default();
    for (i, &temp) in temps.iter().enumerate() {
        let energy = method.energy(&ham, length, temp, 1.0).unwrap();
        assert!((out.energies[i] - energy).abs() < 1e-4, "row {i}");
        let heat = method.heat_capacity(&ham, length, temp, 1.0).unwrap();
        assert!((out.heat_capacities[i] - heat).abs() < 1e-4, "row {i}");
        let sus = method.magnetic_susceptibility(&ham, length, temp, 1.0).unwrap();
        assert!((out.susceptibilities[i] - sus).abs() < 1e-4, "row {i}");
    }
}
