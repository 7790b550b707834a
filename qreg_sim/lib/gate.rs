//! Fixed single-qubit gates and their 2×2 matrices.
//!
//! Gates are identified by a closed set of names; anything else is rejected
//! with [`RegError::UnknownGate`] at the boundary. Matrices are stored as
//! constants and handed out as [`nalgebra`] matrices on demand.

use std::{ fmt, str::FromStr };
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use rand::Rng;
use crate::error::RegError;

const ZERO: C64 = C64 { re: 0.0, im: 0.0 };
const ONE: C64 = C64 { re: 1.0, im: 0.0 };
const I: C64 = C64 { re: 0.0, im: 1.0 };
const ORT2: C64 = C64 { re: std::f64::consts::FRAC_1_SQRT_2, im: 0.0 };

/// A single-qubit gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Identity
    I,
    /// Hadamard
    H,
    /// π rotation about X
    X,
    /// π rotation about Y
    Y,
    /// π rotation about Z
    Z,
    /// π/2 rotation about Z
    S,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parse a gate name, ignoring case.
///
/// Only the non-identity gates have names; `I` is rejected.
impl FromStr for Gate {
    type Err = RegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Self::H),
            "X" => Ok(Self::X),
            "Y" => Ok(Self::Y),
            "Z" => Ok(Self::Z),
            "S" => Ok(Self::S),
            _ => Err(RegError::UnknownGate(s.to_string())),
        }
    }
}

impl Gate {
    /// Return `true` if `self` is `I`.
    pub fn is_i(&self) -> bool { matches!(self, Self::I) }

    /// Return `true` if `self` is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Self::I | Self::Z | Self::S)
    }

    /// Matrix elements in row-major order.
    pub fn elements(self) -> [[C64; 2]; 2] {
        match self {
            Self::I => [[ONE,  ZERO], [ZERO,  ONE ]],
            Self::H => [[ORT2, ORT2], [ORT2, -ORT2]],
            Self::X => [[ZERO, ONE ], [ONE,   ZERO]],
            Self::Y => [[ZERO, -I  ], [I,     ZERO]],
            Self::Z => [[ONE,  ZERO], [ZERO, -ONE ]],
            Self::S => [[ONE,  ZERO], [ZERO,  I   ]],
        }
    }

    /// Return the gate as a 2×2 matrix.
    pub fn matrix(self) -> na::Matrix2<C64> {
        let [[a, b], [c, d]] = self.elements();
        na::Matrix2::new(a, b, c, d)
    }

    /// Return the gate as a dynamically sized 2×2 matrix, suitable for
    /// Kronecker products with other dynamic operators.
    pub fn dmatrix(self) -> na::DMatrix<C64> {
        let [[a, b], [c, d]] = self.elements();
        na::DMatrix::from_row_slice(2, 2, &[a, b, c, d])
    }

    /// Sample a random non-identity gate (`H`, `X`, `Y`, `Z`, or `S`).
    pub fn sample_single<R>(rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        match rng.gen_range(0..5_usize) {
            0 => Self::H,
            1 => Self::X,
            2 => Self::Y,
            3 => Self::Z,
            4 => Self::S,
            _ => unreachable!(),
        }
    }
}

/// CNOT on two adjacent qubits, control first.
pub(crate) static CNOT: Lazy<na::DMatrix<C64>> = Lazy::new(|| {
    na::DMatrix::from_row_slice(4, 4, &[
        ONE,  ZERO, ZERO, ZERO,
        ZERO, ONE,  ZERO, ZERO,
        ZERO, ZERO, ZERO, ONE,
        ZERO, ZERO, ONE,  ZERO,
    ])
});
