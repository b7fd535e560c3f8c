//! Property tests for the qudit P[i] gate.

use num_complex::Complex64;
use proptest::prelude::*;
use std::f64::consts::PI;

use qrew_ir::{EPSILON, Gate, IrError, PdGate};

fn levels_and_index() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=12).prop_flat_map(|d| (Just(d), 0..d))
}

proptest! {
    #[test]
    fn unitary_is_diagonal_with_target_phase((d, ind) in levels_and_index()) {
        let gate = PdGate::new(d, ind).unwrap();
        let u = gate.unitary(&[]).unwrap();
        prop_assert_eq!(u.dim(), d);

        #[allow(clippy::cast_precision_loss)]
        let target = -Complex64::from_polar(1.0, 4.0 * PI / d as f64);
        for row in 0..d {
            for col in 0..d {
                let entry = u.get(row, col).unwrap();
                let expected = if row != col {
                    Complex64::new(0.0, 0.0)
                } else if row == ind {
                    target
                } else {
                    Complex64::new(1.0, 0.0)
                };
                prop_assert!((entry - expected).norm() < 1e-12, "entry ({}, {}) = {}", row, col, entry);
            }
        }
        prop_assert!(u.is_unitary(EPSILON));
    }

    #[test]
    fn gate_contract_matches((d, ind) in levels_and_index()) {
        let gate = Gate::from(PdGate::new(d, ind).unwrap());
        prop_assert_eq!(gate.num_qudits(), 1);
        prop_assert_eq!(gate.num_params(), 0);
        let radices = gate.radices();
        prop_assert_eq!(radices.as_slice(), &[d]);
        prop_assert!(gate.unitary(&[0.0]).is_err());
    }

    #[test]
    fn out_of_range_index_fails(d in 1usize..=12, excess in 0usize..8) {
        let result = PdGate::new(d, d + excess);
        let is_level_error = matches!(
            result,
            Err(IrError::InvalidLevelIndex { .. })
        );
        prop_assert!(is_level_error);
    }
}
