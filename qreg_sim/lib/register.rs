//! The state-vector owner for an *N*-qubit register.
//!
//! A [`Register`] holds 2<sup>*N*</sup> complex amplitudes, where index `i`
//! labels the computational basis state whose *N*-bit binary expansion (qubit
//! 0 first, most significant) is `i`. The buffer is only ever replaced by
//! operations that keep the state normalized: [`Register::add_qubit`], gate
//! application (see [`engine`][crate::engine]) and measurement (see
//! [`measure`][crate::measure]).
//!
//! # Example
//! ```
//! use qreg_sim::{ register::Register, gate::Gate };
//!
//! let mut reg = Register::new();
//! reg.add_qubit();
//! reg.apply(Gate::H, 0).unwrap();
//! println!("{}", reg);
//! // +0.707+0.000i∣00⟩ +0.707+0.000i∣10⟩
//! assert_eq!(reg.basis_label(2).unwrap(), "10");
//! ```

use std::fmt;
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use tracing::{ debug, warn };
use crate::{
    error::{ RegError, RegResult },
    tensor,
};

/// Registers larger than this are still allowed, but will likely exhaust
/// memory.
pub const LARGE_REGISTER: usize = 24;

/// Amplitudes with magnitude below this are omitted from the ket notation.
pub(crate) const DISPLAY_EPS: f64 = 1e-9;

/// An *N*-qubit pure state.
#[derive(Clone, Debug, PartialEq)]
pub struct Register {
    pub(crate) n: usize,
    pub(crate) amps: na::DVector<C64>,
}

/// Creates a single-qubit register in ∣0⟩.
impl Default for Register {
    fn default() -> Self { Self::new() }
}

impl Register {
    /// Create a new single-qubit register initialized to ∣0⟩.
    pub fn new() -> Self {
        Self { n: 1, amps: Self::ket0() }
    }

    fn ket0() -> na::DVector<C64> {
        na::DVector::from_vec(vec![C64::new(1.0, 0.0), C64::new(0.0, 0.0)])
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the dimension of the state space, `2^N`.
    pub fn dim(&self) -> usize { self.amps.len() }

    /// Return a view of all amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[C64] { self.amps.as_slice() }

    /// Return the amplitude of basis state `i`.
    pub fn amplitude_at(&self, i: usize) -> RegResult<C64> {
        self.amps.get(i).copied()
            .ok_or_else(|| RegError::basis_index("amplitude_at", i, self.dim()))
    }

    /// Append a new qubit in ∣0⟩ as the least significant tensor factor,
    /// doubling the length of the state vector.
    pub fn add_qubit(&mut self) -> &mut Self {
        self.amps = tensor::kron_vec(&self.amps, &Self::ket0());
        self.n += 1;
        self.check_len();
        debug!(num_qubits = self.n, "added qubit");
        if self.n > LARGE_REGISTER {
            warn!(
                num_qubits = self.n,
                bytes = self.dim() * std::mem::size_of::<C64>(),
                "register exceeds practical state-vector size"
            );
        }
        self
    }

    /// Reset every qubit to ∣0⟩, keeping the register size.
    pub fn reset(&mut self) -> &mut Self {
        self.amps.fill(C64::new(0.0, 0.0));
        self.amps[0] = C64::new(1.0, 0.0);
        self
    }

    /// Return the squared norm of the state, which should always be 1 up to
    /// floating-point error.
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Return the probability of each basis state, in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Return the *N*-character binary label of basis state `i`, qubit 0
    /// first.
    pub fn basis_label(&self, i: usize) -> RegResult<String> {
        if i < self.dim() {
            Ok(format!("{:0width$b}", i, width = self.n))
        } else {
            Err(RegError::basis_index("basis_label", i, self.dim()))
        }
    }

    /// Return the Bloch vector of a single-qubit register.
    ///
    /// Returns `None` if the register has more than one qubit.
    pub fn bloch_vector(&self) -> Option<BlochVector> {
        (self.n == 1).then(|| BlochVector::from_amps(self.amps[0], self.amps[1]))
    }

    // buffer length is tied to `n` everywhere outside of a mutation
    pub(crate) fn check_len(&self) {
        assert_eq!(
            self.amps.len(), 1 << self.n,
            "register invariant violated: {} amplitudes for {} qubits",
            self.amps.len(), self.n,
        );
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms
            = self.amps.iter()
            .enumerate()
            .filter(|(_, a)| a.norm() > DISPLAY_EPS)
            .map(|(i, a)| {
                format!(
                    "{:+.3}{:+.3}i∣{:0width$b}⟩",
                    a.re, a.im, i, width = self.n,
                )
            })
            .join(" ");
        write!(f, "{}", terms)
    }
}

/// A point on the Bloch sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochVector {
    /// Compute the Bloch vector for the single-qubit state `a0∣0⟩ + a1∣1⟩`.
    ///
    /// The azimuth is taken to be 0 when `a0` vanishes.
    pub fn from_amps(a0: C64, a1: C64) -> Self {
        let theta = 2.0 * a0.norm().clamp(0.0, 1.0).acos();
        let phi
            = if a0.norm() > DISPLAY_EPS { a1.arg() - a0.arg() } else { 0.0 };
        Self {
            x: theta.sin() * phi.cos(),
            y: theta.sin() * phi.sin(),
            z: theta.cos(),
        }
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {:+.2}  y: {:+.2}  z: {:+.2}", self.x, self.y, self.z)
    }
}
