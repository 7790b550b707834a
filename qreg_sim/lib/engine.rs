//! Gate application on a [`Register`].
//!
//! Gates act through the strided kernels in [`tensor`]; the dense embedding
//! `I ⊗ ... ⊗ G ⊗ ... ⊗ I` remains available through
//! [`Register::apply_gate_dense`] as a reference for checking them. Every
//! operation here validates its arguments before mutating anything.

use tracing::{ debug, warn };
use crate::{
    error::{ RegError, RegResult },
    gate::{ Gate, CNOT },
    register::Register,
    tensor,
};

/// Beyond this size the dense reference path needs gigabytes for its operator.
pub const DENSE_QUBIT_LIMIT: usize = 12;

impl Register {
    fn check_target(&self, op: &'static str, target: usize) -> RegResult<()> {
        if target < self.n {
            Ok(())
        } else {
            Err(RegError::qubit_range(op, target, self.n))
        }
    }

    /// Apply `gate` to qubit `target`.
    pub fn apply(&mut self, gate: Gate, target: usize) -> RegResult<&mut Self> {
        self.check_target("apply", target)?;
        let local = gate.matrix();
        let n = self.n;
        match gate {
            Gate::I => { },
            g if g.is_diagonal() => {
                tensor::apply_diagonal(self.amps.as_mut_slice(), &local, target, n);
            },
            _ => {
                tensor::apply_strided(self.amps.as_mut_slice(), &local, target, n);
            },
        }
        debug!(%gate, target, num_qubits = n, "applied gate");
        Ok(self)
    }

    /// Apply the gate named `name` (case-insensitive) to qubit `target`.
    ///
    /// The target is checked before the name.
    pub fn apply_named(&mut self, name: &str, target: usize)
        -> RegResult<&mut Self>
    {
        self.check_target("apply", target)?;
        let gate: Gate = name.parse()?;
        self.apply(gate, target)
    }

    /// Like [`Self::apply`], but by building the full 2<sup>*N*</sup> ×
    /// 2<sup>*N*</sup> operator and multiplying it into the state.
    ///
    /// Produces the same state as `apply` up to floating-point error at
    /// *O*(4<sup>*N*</sup>) cost; intended as a correctness reference.
    pub fn apply_gate_dense(&mut self, gate: Gate, target: usize)
        -> RegResult<&mut Self>
    {
        self.check_target("apply_gate_dense", target)?;
        if self.n > DENSE_QUBIT_LIMIT {
            warn!(num_qubits = self.n, "building dense operator for large register");
        }
        let op = tensor::embed(&gate.dmatrix(), target, self.n);
        self.amps = op * &self.amps;
        self.check_len();
        Ok(self)
    }

    /// Apply a CNOT with `control` and `target`.
    pub(crate) fn apply_cnot(&mut self, control: usize, target: usize)
        -> RegResult<&mut Self>
    {
        self.check_target("cnot", control)?;
        self.check_target("cnot", target)?;
        let n = self.n;
        tensor::apply_cnot(self.amps.as_mut_slice(), control, target, n);
        Ok(self)
    }

    /// Prepare the Bell state (∣00⟩ + ∣11⟩)/√2 on qubits 0 and 1.
    ///
    /// The whole register is first reset to ∣0...0⟩, so any further qubits end
    /// up in ∣0⟩. Fails if there are fewer than 2 qubits.
    pub fn bell_pair(&mut self) -> RegResult<&mut Self> {
        if self.n < 2 {
            return Err(RegError::InsufficientQubits {
                op: "bell_pair",
                required: 2,
                num_qubits: self.n,
            });
        }
        self.reset();
        self.apply(Gate::H, 0)?;
        self.apply_cnot(0, 1)?;
        debug!(num_qubits = self.n, "prepared bell pair");
        Ok(self)
    }

    /// Like [`Self::bell_pair`], but through the dense embedded operators.
    pub fn bell_pair_dense(&mut self) -> RegResult<&mut Self> {
        if self.n < 2 {
            return Err(RegError::InsufficientQubits {
                op: "bell_pair_dense",
                required: 2,
                num_qubits: self.n,
            });
        }
        self.reset();
        self.apply_gate_dense(Gate::H, 0)?;
        let op = tensor::embed_pair(&CNOT, 0, self.n);
        self.amps = op * &self.amps;
        self.check_len();
        Ok(self)
    }
}
