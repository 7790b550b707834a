//! Projective measurement of every qubit in the computational basis.
//!
//! An outcome is drawn from the distribution `|amplitude_i|²` using a
//! caller-supplied random number generator, so that a seeded generator gives a
//! reproducible sequence of outcomes. Measurement then collapses the register
//! onto exactly the basis vector that was drawn (amplitude 1, phase 0).

use std::fmt;
use num_complex::Complex64 as C64;
use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::debug;
use crate::register::Register;

/// Total probability may drift from 1 by at most this much before the state is
/// considered corrupt.
pub const PROB_TOLERANCE: f64 = 1e-6;

/// The result of a measurement, generated by [`Register::measure_all`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outcome {
    /// Basis-state index that was drawn.
    pub index: usize,
    /// Number of qubits in the register at measurement time.
    pub num_qubits: usize,
    /// Probability with which `index` was drawn.
    pub probability: f64,
}

impl Outcome {
    /// Return the *N*-character binary label of the outcome, qubit 0 first.
    pub fn label(&self) -> String {
        format!("{:0width$b}", self.index, width = self.num_qubits)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "∣{}⟩", self.label())
    }
}

/// Draw an index from the categorical distribution `probs` given a uniform
/// draw `u` in [0, 1).
///
/// Indices with zero probability are never returned. If `u` exceeds the
/// accumulated total because of rounding, the last index with nonzero
/// probability is returned.
///
/// *Panics if `probs` contains no nonzero entries.*
pub fn sample_index(probs: &[f64], u: f64) -> usize {
    let mut acc: f64 = 0.0;
    for (i, p) in probs.iter().enumerate() {
        if *p <= 0.0 { continue; }
        acc += p;
        if u < acc { return i; }
    }
    probs.iter()
        .rposition(|p| *p > 0.0)
        .expect("sample_index: empty probability distribution")
}

impl Register {
    // probabilities, checked against the normalization invariant
    fn checked_probabilities(&self) -> Vec<f64> {
        self.check_len();
        let probs = self.probabilities();
        let total: f64 = probs.iter().sum();
        assert!(
            (total - 1.0).abs() < PROB_TOLERANCE,
            "register invariant violated: total probability {}", total,
        );
        probs
    }

    /// Perform a projective measurement on all qubits in the computational
    /// basis, collapsing the register onto the outcome.
    ///
    /// *Panics if the state is not normalized.*
    pub fn measure_all<R>(&mut self, rng: &mut R) -> Outcome
    where R: Rng + ?Sized
    {
        let probs = self.checked_probabilities();
        let index = sample_index(&probs, rng.gen::<f64>());
        self.amps.fill(C64::new(0.0, 0.0));
        self.amps[index] = C64::new(1.0, 0.0);
        let outcome = Outcome { index, num_qubits: self.n, probability: probs[index] };
        debug!(
            outcome = %outcome,
            probability = outcome.probability,
            "measured register"
        );
        outcome
    }

    /// Sample `shots` measurement outcomes without collapsing the register,
    /// returning the number of times each basis index was drawn.
    ///
    /// *Panics if the state is not normalized.*
    pub fn sample<R>(&self, shots: usize, rng: &mut R) -> FxHashMap<usize, usize>
    where R: Rng + ?Sized
    {
        let probs = self.checked_probabilities();
        let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
        for _ in 0..shots {
            *counts.entry(sample_index(&probs, rng.gen::<f64>())).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, SeedableRng };
    use crate::gate::Gate;

    fn register(n: usize) -> Register {
        let mut reg = Register::new();
        (1..n).for_each(|_| { reg.add_qubit(); });
        reg
    }

    fn is_basis_vector(reg: &Register) -> bool {
        let ones
            = reg.amplitudes().iter()
            .filter(|a| (*a - C64::new(1.0, 0.0)).norm() < 1e-15)
            .count();
        let zeros
            = reg.amplitudes().iter()
            .filter(|a| a.norm() == 0.0)
            .count();
        ones == 1 && zeros == reg.dim() - 1
    }

    #[test]
    fn sample_index_skips_zero_probability() {
        let probs = [0.0, 0.5, 0.0, 0.5];
        assert_eq!(sample_index(&probs, 0.0), 1);
        assert_eq!(sample_index(&probs, 0.49), 1);
        assert_eq!(sample_index(&probs, 0.5), 3);
        assert_eq!(sample_index(&probs, 0.999), 3);
    }

    #[test]
    fn sample_index_absorbs_rounding() {
        let probs = [0.3, 0.3, 0.3999999, 0.0];
        assert_eq!(sample_index(&probs, 0.99999999), 2);
    }

    #[test]
    fn basis_state_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(10546);
        let mut reg = register(3);
        reg.apply(Gate::X, 0).unwrap().apply(Gate::X, 2).unwrap();
        let before = reg.clone();
        for _ in 0..100 {
            let outcome = reg.measure_all(&mut rng);
            assert_eq!(outcome.index, 0b101);
            assert_eq!(outcome.probability, 1.0);
            assert_eq!(reg, before);
        }
    }

    #[test]
    fn bell_outcomes_and_collapse() {
        const TRIALS: usize = 4000;
        let mut rng = StdRng::seed_from_u64(10546);
        let mut counts = [0_usize; 4];
        for _ in 0..TRIALS {
            let mut reg = register(2);
            reg.bell_pair().unwrap();
            let outcome = reg.measure_all(&mut rng);
            assert!(outcome.index == 0 || outcome.index == 3);
            assert!((outcome.probability - 0.5).abs() < 1e-9);
            assert!(is_basis_vector(&reg));
            assert_eq!(reg.amplitude_at(outcome.index), Ok(C64::new(1.0, 0.0)));
            counts[outcome.index] += 1;
        }
        let f00 = counts[0] as f64 / TRIALS as f64;
        let f11 = counts[3] as f64 / TRIALS as f64;
        assert!((f00 - 0.5).abs() < 0.05, "f00 = {f00}");
        assert!((f11 - 0.5).abs() < 0.05, "f11 = {f11}");
    }

    #[test]
    fn seeded_measurements_reproduce() {
        let run = |seed: u64| -> Vec<usize> {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| {
                    let mut reg = register(3);
                    (0..3).for_each(|k| { reg.apply(Gate::H, k).unwrap(); });
                    reg.measure_all(&mut rng).index
                })
                .collect()
        };
        assert_eq!(run(12), run(12));
    }

    #[test]
    fn sample_leaves_state_alone() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut reg = register(2);
        reg.bell_pair().unwrap();
        let before = reg.clone();
        let counts = reg.sample(1000, &mut rng);
        assert_eq!(reg, before);
        assert_eq!(counts.values().sum::<usize>(), 1000);
        assert!(counts.keys().all(|k| *k == 0 || *k == 3));
    }

    #[test]
    #[should_panic]
    fn unnormalized_state_is_fatal() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut reg = register(1);
        reg.amps[1] = C64::new(1.0, 0.0);
        reg.measure_all(&mut rng);
    }

    #[test]
    fn outcome_labels() {
        let outcome = Outcome { index: 0b011, num_qubits: 3, probability: 1.0 };
        assert_eq!(outcome.label(), "011");
        assert_eq!(outcome.to_string(), "∣011⟩");
    }
}
