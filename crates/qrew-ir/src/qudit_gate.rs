//! Constant single-qudit gates defined for any number of levels.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{IrError, IrResult};
use crate::gate::check_params;
use crate::unitary::{Radices, UnitaryMatrix};

/// Primitive `d`-th root of unity, `ω = e^(2πi/d)`.
#[allow(clippy::cast_precision_loss)]
fn omega(num_levels: usize) -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * PI / num_levels as f64)
}

fn check_levels(num_levels: usize) -> IrResult<()> {
    if num_levels == 0 {
        Err(IrError::InvalidRadix(num_levels))
    } else {
        Ok(())
    }
}

/// The one-qudit P[i] gate.
///
/// ```text
/// P[i]_d = Σ_j (-ω²)^δ(i,j) |j⟩⟨j|,   ω = e^(2πi/d)
/// ```
///
/// The target level `ind` picks up the phase `-ω²`; every other level is
/// left alone. On a single level (`d = 1`) the gate is `[-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct PdGate {
    num_levels: usize,
    ind: usize,
}

impl PdGate {
    /// Create a P[ind] gate on a `num_levels`-level qudit.
    ///
    /// Requires `0 <= ind < num_levels`.
    pub fn new(num_levels: usize, ind: usize) -> IrResult<Self> {
        check_levels(num_levels)?;
        if ind >= num_levels {
            return Err(IrError::InvalidLevelIndex {
                gate_name: "pd".into(),
                index: ind,
                num_levels,
            });
        }
        Ok(Self { num_levels, ind })
    }

    /// Number of levels.
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// The level receiving the phase.
    pub fn ind(&self) -> usize {
        self.ind
    }

    /// Radices of the single wire.
    pub fn radices(&self) -> Radices {
        Radices(vec![self.num_levels])
    }

    /// Compute the diagonal unitary; `params` must be empty.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        check_params("pd", 0, params)?;
        let w = omega(self.num_levels);
        let phase = -(w * w);
        let diagonal = (0..self.num_levels)
            .map(|level| {
                if level == self.ind {
                    phase
                } else {
                    Complex64::new(1.0, 0.0)
                }
            })
            .collect();
        UnitaryMatrix::from_diagonal(diagonal, self.radices())
    }
}

impl TryFrom<(usize, usize)> for PdGate {
    type Error = IrError;

    fn try_from((num_levels, ind): (usize, usize)) -> IrResult<Self> {
        PdGate::new(num_levels, ind)
    }
}

impl From<PdGate> for (usize, usize) {
    fn from(gate: PdGate) -> Self {
        (gate.num_levels, gate.ind)
    }
}

/// The one-qudit clock gate `Z_d = Σ_k ω^k |k⟩⟨k|`.
///
/// On a qubit this is Pauli-Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ClockGate {
    radix: usize,
}

impl ClockGate {
    /// Create a clock gate on a `radix`-level qudit.
    pub fn new(radix: usize) -> IrResult<Self> {
        check_levels(radix)?;
        Ok(Self { radix })
    }

    /// Number of levels.
    pub fn radix(&self) -> usize {
        self.radix
    }

    /// Radices of the single wire.
    pub fn radices(&self) -> Radices {
        Radices(vec![self.radix])
    }

    /// Compute the diagonal unitary; `params` must be empty.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        check_params("clock", 0, params)?;
        let w = omega(self.radix);
        let mut phase = Complex64::new(1.0, 0.0);
        let diagonal = (0..self.radix)
            .map(|_| {
                let entry = phase;
                phase *= w;
                entry
            })
            .collect();
        UnitaryMatrix::from_diagonal(diagonal, self.radices())
    }
}

impl TryFrom<usize> for ClockGate {
    type Error = IrError;

    fn try_from(radix: usize) -> IrResult<Self> {
        ClockGate::new(radix)
    }
}

impl From<ClockGate> for usize {
    fn from(gate: ClockGate) -> Self {
        gate.radix
    }
}

/// The one-qudit shift gate `X_d |k⟩ = |k + 1 mod d⟩`.
///
/// On a qubit this is Pauli-X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ShiftGate {
    radix: usize,
}

impl ShiftGate {
    /// Create a shift gate on a `radix`-level qudit.
    pub fn new(radix: usize) -> IrResult<Self> {
        check_levels(radix)?;
        Ok(Self { radix })
    }

    /// Number of levels.
    pub fn radix(&self) -> usize {
        self.radix
    }

    /// Radices of the single wire.
    pub fn radices(&self) -> Radices {
        Radices(vec![self.radix])
    }

    /// Compute the permutation unitary; `params` must be empty.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        check_params("shift", 0, params)?;
        let d = self.radix;
        let mut values = vec![Complex64::new(0.0, 0.0); d * d];
        for k in 0..d {
            values[((k + 1) % d) * d + k] = Complex64::new(1.0, 0.0);
        }
        UnitaryMatrix::from_row_major(values, self.radices())
    }
}

impl TryFrom<usize> for ShiftGate {
    type Error = IrError;

    fn try_from(radix: usize) -> IrResult<Self> {
        ShiftGate::new(radix)
    }
}

impl From<ShiftGate> for usize {
    fn from(gate: ShiftGate) -> Self {
        gate.radix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::unitary::EPSILON;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn test_pd_qutrit() {
        let u = PdGate::new(3, 1).unwrap().unitary(&[]).unwrap();
        let expected = -Complex64::from_polar(1.0, 4.0 * PI / 3.0);
        assert!(close(u.get(0, 0).unwrap(), Complex64::new(1.0, 0.0)));
        assert!(close(u.get(1, 1).unwrap(), expected));
        assert!(close(u.get(2, 2).unwrap(), Complex64::new(1.0, 0.0)));
        assert!(close(u.get(0, 1).unwrap(), Complex64::new(0.0, 0.0)));
        assert!(u.is_unitary(EPSILON));
    }

    #[test]
    fn test_pd_qubit_is_z_on_target() {
        // ω = -1 for a qubit, so -ω² = -1.
        let u = PdGate::new(2, 1).unwrap().unitary(&[]).unwrap();
        let z = StandardGate::Z.unitary(&[]).unwrap();
        assert!(u.approx_eq(&z, EPSILON));
    }

    #[test]
    fn test_pd_single_level() {
        let u = PdGate::new(1, 0).unwrap().unitary(&[]).unwrap();
        assert_eq!(u.dim(), 1);
        assert!(close(u.get(0, 0).unwrap(), Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn test_pd_index_bounds() {
        assert!(matches!(
            PdGate::new(3, 3),
            Err(IrError::InvalidLevelIndex { index: 3, num_levels: 3, .. })
        ));
        assert!(matches!(
            PdGate::new(3, 7),
            Err(IrError::InvalidLevelIndex { .. })
        ));
        assert!(matches!(PdGate::new(0, 0), Err(IrError::InvalidRadix(0))));
        assert!(PdGate::new(3, 2).is_ok());
    }

    #[test]
    fn test_pd_rejects_params() {
        let pd = PdGate::new(4, 2).unwrap();
        assert!(matches!(
            pd.unitary(&[0.5]),
            Err(IrError::ParameterCountMismatch { expected: 0, got: 1, .. })
        ));
    }

    #[test]
    fn test_pd_serde_validates() {
        let pd = PdGate::new(4, 2).unwrap();
        let json = serde_json::to_string(&pd).unwrap();
        assert_eq!(json, "[4,2]");
        assert_eq!(serde_json::from_str::<PdGate>(&json).unwrap(), pd);
        assert!(serde_json::from_str::<PdGate>("[3,3]").is_err());
    }

    #[test]
    fn test_clock_and_shift_on_qubit() {
        let z = StandardGate::Z.unitary(&[]).unwrap();
        let x = StandardGate::X.unitary(&[]).unwrap();
        assert!(ClockGate::new(2).unwrap().unitary(&[]).unwrap().approx_eq(&z, EPSILON));
        assert!(ShiftGate::new(2).unwrap().unitary(&[]).unwrap().approx_eq(&x, EPSILON));
    }

    #[test]
    fn test_weyl_commutation() {
        // Z X = ω X Z
        let d = 5;
        let z = ClockGate::new(d).unwrap().unitary(&[]).unwrap();
        let x = ShiftGate::new(d).unwrap().unitary(&[]).unwrap();
        let zx = z.dot(&x).unwrap();
        let xz = x.dot(&z).unwrap();
        let w = omega(d);
        for row in 0..d {
            for col in 0..d {
                assert!(close(zx.get(row, col).unwrap(), w * xz.get(row, col).unwrap()));
            }
        }
        assert!(x.is_unitary(EPSILON));
        assert!(z.is_unitary(EPSILON));
    }
}
