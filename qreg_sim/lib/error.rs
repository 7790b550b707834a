//! Recoverable errors raised by register operations.
//!
//! Every operation that can fail validates its arguments completely before
//! touching the amplitude buffer, so an `Err` always leaves the register
//! exactly as it was. Broken internal invariants (buffer length, total
//! probability) are not represented here; they panic.

use thiserror::Error;

/// Result type alias for register operations.
pub type RegResult<T> = Result<T, RegError>;

/// Errors that can be reported back to a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegError {
    /// A target qubit index outside `0..num_qubits`.
    #[error("{op}: target qubit {target} out of range for {num_qubits}-qubit register")]
    QubitRange {
        /// Name of the failing operation.
        op: &'static str,
        /// Offending qubit index.
        target: usize,
        /// Register size at the time of the call.
        num_qubits: usize,
    },

    /// A gate name outside the supported set.
    #[error("unknown gate '{0}'; available: H, X, Y, Z, S")]
    UnknownGate(String),

    /// A basis-state index outside `0..2^num_qubits`.
    #[error("{op}: basis index {index} out of range for dimension {dim}")]
    BasisIndex {
        /// Name of the failing operation.
        op: &'static str,
        /// Offending basis index.
        index: usize,
        /// Dimension of the state space.
        dim: usize,
    },

    /// An operation needing more qubits than the register holds.
    #[error("{op}: need at least {required} qubits, have {num_qubits}")]
    InsufficientQubits {
        /// Name of the failing operation.
        op: &'static str,
        /// Minimum register size.
        required: usize,
        /// Register size at the time of the call.
        num_qubits: usize,
    },
}

impl RegError {
    pub(crate) fn qubit_range(op: &'static str, target: usize, num_qubits: usize)
        -> Self
    {
        Self::QubitRange { op, target, num_qubits }
    }

    pub(crate) fn basis_index(op: &'static str, index: usize, dim: usize)
        -> Self
    {
        Self::BasisIndex { op, index, dim }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_operation_and_value() {
        let err = RegError::qubit_range("apply", 5, 2);
        let msg = err.to_string();
        assert!(msg.contains("apply"));
        assert!(msg.contains('5'));
        assert!(msg.contains("2-qubit"));

        let err = RegError::UnknownGate("T".to_string());
        assert!(err.to_string().contains("'T'"));

        let err = RegError::basis_index("amplitude_at", 9, 8);
        assert!(err.to_string().contains("amplitude_at"));
        assert!(err.to_string().contains('9'));

        let err = RegError::InsufficientQubits {
            op: "bell_pair",
            required: 2,
            num_qubits: 1,
        };
        assert_eq!(err.to_string(), "bell_pair: need at least 2 qubits, have 1");
    }
}
