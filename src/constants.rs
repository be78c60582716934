/// Boltzmann constant in J/K.
pub const BOLTZMANN_K: f64 = 1.38064852e-23;
