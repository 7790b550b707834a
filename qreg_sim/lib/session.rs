//! A single interactive session: one register plus the random number generator
//! used to measure it.
//!
//! Callers hold a [`Session`] and pass it by reference to whatever needs to
//! drive the simulation; there is no global state.

use rand::{ rngs::StdRng, SeedableRng };
use rustc_hash::FxHashMap;
use tracing::info;
use crate::{
    error::RegResult,
    gate::Gate,
    measure::Outcome,
    register::Register,
};

/// Main driver owning a [`Register`] and its measurement randomness.
#[derive(Clone, Debug)]
pub struct Session {
    state: Register,
    outcomes: Vec<Outcome>,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self { Self::new(None) }
}

impl Session {
    /// Create a new `Session` with a single qubit in ∣0⟩ and no recorded
    /// outcomes.
    ///
    /// Measurements are reproducible when `seed` is given; otherwise the
    /// generator is seeded from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng
            = seed.map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        info!(?seed, "started session");
        Self { state: Register::new(), outcomes: Vec::new(), rng }
    }

    /// Return a reference to the register.
    pub fn register(&self) -> &Register { &self.state }

    /// Return every outcome of [`Self::measure_all`] so far, oldest first.
    pub fn outcomes(&self) -> &[Outcome] { &self.outcomes }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.state.num_qubits() }

    /// Append a qubit in ∣0⟩, returning the new register size.
    pub fn add_qubit(&mut self) -> usize {
        self.state.add_qubit().num_qubits()
    }

    /// Apply `gate` to qubit `target`.
    pub fn apply(&mut self, gate: Gate, target: usize) -> RegResult<()> {
        self.state.apply(gate, target).map(|_| ())
    }

    /// Apply the gate named `name` to qubit `target`.
    pub fn apply_named(&mut self, name: &str, target: usize) -> RegResult<Gate>
    {
        self.state.apply_named(name, target)?;
        name.parse()
    }

    /// Prepare a Bell pair on qubits 0 and 1.
    pub fn bell_pair(&mut self) -> RegResult<()> {
        self.state.bell_pair().map(|_| ())
    }

    /// Measure every qubit, collapsing the register, and record the outcome.
    pub fn measure_all(&mut self) -> Outcome {
        let outcome = self.state.measure_all(&mut self.rng);
        self.outcomes.push(outcome);
        outcome
    }

    /// Sample `shots` outcomes without collapsing the register.
    pub fn sample(&mut self, shots: usize) -> FxHashMap<usize, usize> {
        self.state.sample(shots, &mut self.rng)
    }
}
