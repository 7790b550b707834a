//! Tensor-product embedding of local operators into the full register space.
//!
//! Qubit 0 is always the most significant tensor factor: in a register of `n`
//! qubits, qubit `k` corresponds to bit `n - 1 - k` of a basis index.
//!
//! Two code paths are provided. The dense path builds the full 2<sup>*n*</sup>
//! × 2<sup>*n*</sup> operator `I ⊗ ... ⊗ G ⊗ ... ⊗ I` by repeated Kronecker
//! products and multiplies it into the state; it costs *O*(4<sup>*n*</sup>) in
//! memory and is kept as a reference. The strided path touches each pair of
//! amplitudes differing only in the target bit exactly once, which is
//! *O*(2<sup>*n*</sup>) in time and allocates nothing.

use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;

/// Bit mask selecting qubit `k` of an `n`-qubit basis index.
pub fn qubit_mask(k: usize, n: usize) -> usize { 1 << (n - 1 - k) }

/// Kronecker product of two state vectors, `a` as the more significant factor.
pub fn kron_vec(a: &na::DVector<C64>, b: &na::DVector<C64>) -> na::DVector<C64>
{
    na::DVector::from_iterator(
        a.len() * b.len(),
        a.as_slice().iter()
            .cartesian_product(b.as_slice())
            .map(|(ai, bj)| *ai * *bj),
    )
}

/// Build the full operator for a 2×2 `local` acting on qubit `target` of an
/// `n`-qubit register.
pub fn embed(local: &na::DMatrix<C64>, target: usize, n: usize)
    -> na::DMatrix<C64>
{
    embed_block(local, 1, target, n)
}

/// Build the full operator for a 4×4 `local` acting on the adjacent qubits
/// `first` and `first + 1` of an `n`-qubit register, with `first` as the more
/// significant factor.
pub fn embed_pair(local: &na::DMatrix<C64>, first: usize, n: usize)
    -> na::DMatrix<C64>
{
    embed_block(local, 2, first, n)
}

// `local` spans `width` consecutive factors starting at `first`
fn embed_block(local: &na::DMatrix<C64>, width: usize, first: usize, n: usize)
    -> na::DMatrix<C64>
{
    let side = 1_usize << width;
    assert_eq!(local.shape(), (side, side), "local operator shape mismatch");
    assert!(first + width <= n, "local operator does not fit in register");
    let before = na::DMatrix::<C64>::identity(1 << first, 1 << first);
    let rest = n - first - width;
    let after = na::DMatrix::<C64>::identity(1 << rest, 1 << rest);
    before.kronecker(local).kronecker(&after)
}

/// Apply a 2×2 `local` to qubit `target` of the `n`-qubit state `amps` in
/// place.
pub fn apply_strided(
    amps: &mut [C64],
    local: &na::Matrix2<C64>,
    target: usize,
    n: usize,
) {
    debug_assert_eq!(amps.len(), 1 << n);
    let mask = qubit_mask(target, n);
    let (m00, m01, m10, m11)
        = (local[(0, 0)], local[(0, 1)], local[(1, 0)], local[(1, 1)]);
    for i in (0..amps.len()).filter(|i| i & mask == 0) {
        let j = i | mask;
        let (a0, a1) = (amps[i], amps[j]);
        amps[i] = m00 * a0 + m01 * a1;
        amps[j] = m10 * a0 + m11 * a1;
    }
}

/// Apply a 2×2 diagonal `diag` to qubit `target` of the `n`-qubit state `amps`
/// in place; off-diagonal elements are ignored.
pub fn apply_diagonal(
    amps: &mut [C64],
    diag: &na::Matrix2<C64>,
    target: usize,
    n: usize,
) {
    debug_assert_eq!(amps.len(), 1 << n);
    let mask = qubit_mask(target, n);
    let (d0, d1) = (diag[(0, 0)], diag[(1, 1)]);
    amps.iter_mut()
        .enumerate()
        .for_each(|(i, a)| { *a *= if i & mask == 0 { d0 } else { d1 }; });
}

/// Apply a CNOT to the `n`-qubit state `amps` in place.
pub fn apply_cnot(amps: &mut [C64], control: usize, target: usize, n: usize) {
    debug_assert_eq!(amps.len(), 1 << n);
    debug_assert_ne!(control, target);
    let cmask = qubit_mask(control, n);
    let tmask = qubit_mask(target, n);
    for i in (0..amps.len()).filter(|i| i & cmask != 0 && i & tmask == 0) {
        amps.swap(i, i | tmask);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, Rng, SeedableRng };
    use crate::gate::{ Gate, CNOT };

    const GATES: [Gate; 6] = [Gate::I, Gate::H, Gate::X, Gate::Y, Gate::Z, Gate::S];

    fn random_state<R: Rng>(n: usize, rng: &mut R) -> na::DVector<C64> {
        let v = na::DVector::from_iterator(
            1 << n,
            (0..1 << n).map(|_| C64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)),
        );
        let norm = v.norm();
        v.unscale(norm)
    }

    fn vec_approx_eq(a: &[C64], b: &[C64]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(ak, bk)| (ak - bk).norm() < 1e-12)
    }

    #[test]
    fn masks_follow_msb_convention() {
        assert_eq!(qubit_mask(0, 3), 0b100);
        assert_eq!(qubit_mask(1, 3), 0b010);
        assert_eq!(qubit_mask(2, 3), 0b001);
        assert_eq!(qubit_mask(0, 1), 0b1);
    }

    #[test]
    fn kron_vec_appends_factor() {
        let a = na::DVector::from_vec(vec![C64::new(0.6, 0.0), C64::new(0.0, 0.8)]);
        let zero = na::DVector::from_vec(vec![C64::new(1.0, 0.0), C64::new(0.0, 0.0)]);
        let ab = kron_vec(&a, &zero);
        let expected = [
            C64::new(0.6, 0.0), C64::new(0.0, 0.0),
            C64::new(0.0, 0.8), C64::new(0.0, 0.0),
        ];
        assert!(vec_approx_eq(ab.as_slice(), &expected));
    }

    #[test]
    fn embed_shape_and_placement() {
        let x = Gate::X.dmatrix();
        let op = embed(&x, 0, 2);
        assert_eq!(op.shape(), (4, 4));
        // X on the most significant qubit swaps ∣0b⟩ and ∣1b⟩
        assert_eq!(op[(2, 0)], C64::new(1.0, 0.0));
        assert_eq!(op[(3, 1)], C64::new(1.0, 0.0));
        assert_eq!(op[(1, 0)], C64::new(0.0, 0.0));

        let op = embed(&x, 1, 2);
        assert_eq!(op[(1, 0)], C64::new(1.0, 0.0));
        assert_eq!(op[(2, 0)], C64::new(0.0, 0.0));
    }

    #[test]
    fn strided_x_never_touches_other_bits() {
        let mut amps = vec![C64::new(0.0, 0.0); 4];
        amps[0] = C64::new(1.0, 0.0);
        apply_strided(&mut amps, &Gate::X.matrix(), 0, 2);
        assert_eq!(amps[2], C64::new(1.0, 0.0));
        assert_eq!(amps.iter().filter(|a| a.norm() > 0.0).count(), 1);
    }

    #[test]
    fn strided_matches_dense() {
        let mut rng = StdRng::seed_from_u64(10546);
        for n in 1..=4 {
            for target in 0..n {
                for g in GATES {
                    let psi = random_state(n, &mut rng);
                    let dense = embed(&g.dmatrix(), target, n) * &psi;
                    let mut strided = psi.clone();
                    apply_strided(strided.as_mut_slice(), &g.matrix(), target, n);
                    assert!(
                        vec_approx_eq(dense.as_slice(), strided.as_slice()),
                        "n = {n}, target = {target}, gate = {g}",
                    );
                }
            }
        }
    }

    #[test]
    fn diagonal_matches_dense() {
        let mut rng = StdRng::seed_from_u64(7);
        for g in [Gate::I, Gate::Z, Gate::S] {
            for target in 0..3 {
                let psi = random_state(3, &mut rng);
                let dense = embed(&g.dmatrix(), target, 3) * &psi;
                let mut diag = psi.clone();
                apply_diagonal(diag.as_mut_slice(), &g.matrix(), target, 3);
                assert!(vec_approx_eq(dense.as_slice(), diag.as_slice()));
            }
        }
    }

    #[test]
    fn cnot_matches_dense() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in 2..=4 {
            for first in 0..n - 1 {
                let psi = random_state(n, &mut rng);
                let dense = embed_pair(&CNOT, first, n) * &psi;
                let mut strided = psi.clone();
                apply_cnot(strided.as_mut_slice(), first, first + 1, n);
                assert!(vec_approx_eq(dense.as_slice(), strided.as_slice()));
            }
        }
    }

    #[test]
    #[should_panic]
    fn embed_pair_out_of_bounds() {
        embed_pair(&CNOT, 1, 2);
    }
}
