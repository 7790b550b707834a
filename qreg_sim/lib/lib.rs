//! State-vector simulation of a small register of qubits.
//!
//! A [`Register`][register::Register] stores all 2<sup>*N*</sup> complex
//! amplitudes of an *N*-qubit pure state. Single-qubit gates from a fixed set
//! (Hadamard, Pauli, and π/2 phase) are embedded into the full space by tensor
//! product with identities and applied in place; all qubits can be measured at
//! once in the computational basis, collapsing the state.
//!
//! Memory grows as *O*(2<sup>*N*</sup>), so this is only practical for a few
//! tens of qubits at most.

pub mod error;
pub mod gate;
pub mod tensor;
pub mod register;
pub mod engine;
pub mod measure;
pub mod session;
