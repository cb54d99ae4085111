//! Constants shared across lattice construction, generation and execution.

/// Constants governing code parameters and program layout.
pub mod surface_constants {
    /// Smallest supported distance (rotated) or side length (unrotated).
    pub const MIN_CODE_SIZE: usize = 3;
    /// Prefix of the per-round syndrome registers (`round_0`, `round_1`, ...).
    pub const ROUND_REGISTER_PREFIX: &str = "round_";
    /// Name of the register holding the final data-qubit readout.
    pub const READOUT_REGISTER: &str = "data_output";
    /// Largest program the state-vector backend accepts.
    pub const MAX_SIMULATED_QUBITS: usize = 24;
    /// Tolerance used when checking state normalization.
    pub const NORM_TOLERANCE: f64 = 1e-9;
}
