//! Dense unitary matrices over mixed-radix qudit registers.
//!
//! Basis states are indexed big-endian: qudit 0 is the most significant
//! digit, so for two qubits the index of `|q0 q1⟩` is `2 * q0 + q1`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qudit::QuditId;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Ordered number of levels for each wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Radices(pub(crate) Vec<usize>);

impl Radices {
    /// Create radices from per-wire level counts.
    pub fn new(radices: impl IntoIterator<Item = usize>) -> IrResult<Self> {
        let radices: Vec<usize> = radices.into_iter().collect();
        if radices.contains(&0) {
            return Err(IrError::InvalidRadix(0));
        }
        Ok(Self(radices))
    }

    /// Radices of `n` qubit wires.
    pub fn qubits(n: usize) -> Self {
        Self(vec![2; n])
    }

    /// Radices of `n` wires that all have `radix` levels.
    pub fn uniform(radix: usize, n: usize) -> IrResult<Self> {
        if radix == 0 {
            return Err(IrError::InvalidRadix(radix));
        }
        Ok(Self(vec![radix; n]))
    }

    /// Number of wires.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no wires.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimension of the joint Hilbert space (product of radices).
    ///
    /// Fails when the product does not fit in a `usize`.
    pub fn dim(&self) -> IrResult<usize> {
        self.0
            .iter()
            .try_fold(1usize, |acc, &radix| acc.checked_mul(radix))
            .ok_or_else(|| IrError::RegisterTooLarge(self.to_string()))
    }

    /// Levels of one wire.
    pub fn get(&self, qudit: QuditId) -> Option<usize> {
        self.0.get(qudit.index()).copied()
    }

    /// Per-wire level counts.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Decompose a basis index into one digit per wire.
    pub fn digits(&self, mut index: usize) -> Vec<usize> {
        let mut digits = vec![0; self.0.len()];
        for (digit, &radix) in digits.iter_mut().zip(&self.0).rev() {
            *digit = index % radix;
            index /= radix;
        }
        digits
    }

    /// Compose per-wire digits back into a basis index.
    pub fn index_of(&self, digits: impl IntoIterator<Item = usize>) -> usize {
        digits
            .into_iter()
            .zip(&self.0)
            .fold(0, |acc, (digit, &radix)| acc * radix + digit)
    }

    /// Concatenate two registers.
    #[must_use]
    pub fn concat(&self, other: &Radices) -> Radices {
        Radices(self.0.iter().chain(&other.0).copied().collect())
    }
}

impl TryFrom<Vec<usize>> for Radices {
    type Error = IrError;

    fn try_from(radices: Vec<usize>) -> IrResult<Self> {
        Radices::new(radices)
    }
}

impl From<Radices> for Vec<usize> {
    fn from(radices: Radices) -> Self {
        radices.0
    }
}

impl fmt::Display for Radices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// An immutable square complex matrix annotated with per-wire radices.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    data: Array2<Complex64>,
    radices: Radices,
}

impl UnitaryMatrix {
    /// Wrap a matrix, checking its shape against the radices.
    ///
    /// Unitarity itself is not checked here; see [`is_unitary`](Self::is_unitary).
    pub fn new(data: Array2<Complex64>, radices: Radices) -> IrResult<Self> {
        let expected = radices.dim()?;
        let (rows, cols) = data.dim();
        if rows != expected || cols != expected {
            return Err(IrError::DimensionMismatch {
                expected,
                rows,
                cols,
            });
        }
        Ok(Self { data, radices })
    }

    /// Build from row-major entries.
    pub fn from_row_major(values: Vec<Complex64>, radices: Radices) -> IrResult<Self> {
        let dim = radices.dim()?;
        let len = values.len();
        let data = Array2::from_shape_vec((dim, dim), values).map_err(|_| {
            IrError::DimensionMismatch {
                expected: dim,
                rows: len / dim.max(1),
                cols: dim,
            }
        })?;
        Ok(Self { data, radices })
    }

    /// Build a diagonal matrix.
    pub fn from_diagonal(diagonal: Vec<Complex64>, radices: Radices) -> IrResult<Self> {
        let data = Array2::from_diag(&Array1::from(diagonal));
        Self::new(data, radices)
    }

    /// The identity on a register.
    pub fn identity(radices: Radices) -> IrResult<Self> {
        let data = Array2::eye(radices.dim()?);
        Ok(Self { data, radices })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Per-wire radices.
    #[inline]
    pub fn radices(&self) -> &Radices {
        &self.radices
    }

    /// Number of wires this matrix acts on.
    #[inline]
    pub fn num_qudits(&self) -> usize {
        self.radices.len()
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        self.data.get((row, col)).copied()
    }

    /// Borrow the underlying matrix.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Matrix product `self * other`, i.e. `other` is applied first.
    pub fn dot(&self, other: &Self) -> IrResult<Self> {
        if self.radices != other.radices {
            return Err(IrError::DimensionMismatch {
                expected: self.dim(),
                rows: other.dim(),
                cols: other.dim(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
            radices: self.radices.clone(),
        })
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            data: self.data.t().mapv(|z| z.conj()),
            radices: self.radices.clone(),
        }
    }

    /// Tensor product; `self` acts on the leading wires.
    #[must_use]
    pub fn kron(&self, other: &Self) -> Self {
        Self {
            data: ndarray::linalg::kron(&self.data, &other.data),
            radices: self.radices.concat(&other.radices),
        }
    }

    /// Check `U·U† ≈ I` entrywise within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = self.data.dot(&self.data.t().mapv(|z| z.conj()));
        product.indexed_iter().all(|((i, j), z)| {
            let expected = if i == j { 1.0 } else { 0.0 };
            (z - Complex64::new(expected, 0.0)).norm() < tol
        })
    }

    /// Entrywise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.radices == other.radices
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Comparison that ignores a global phase.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        if self.radices != other.radices {
            return false;
        }
        // Align phases on the entry of largest magnitude.
        let Some((idx, pivot)) = other
            .data
            .indexed_iter()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
        else {
            return true;
        };
        if pivot.norm() < EPSILON {
            return self.data.iter().all(|z| z.norm() < tol);
        }
        let phase = self.data[idx] / pivot;
        if (phase.norm() - 1.0).abs() > tol {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b * phase).norm() < tol)
    }

    /// Lift this matrix onto `location` of a larger register.
    ///
    /// The i-th wire of this matrix is placed on `location[i]`; every other
    /// wire of `register` is left untouched.
    pub fn embed(&self, location: &[QuditId], register: &Radices) -> IrResult<Self> {
        if location.len() != self.num_qudits() {
            return Err(IrError::QuditCountMismatch {
                gate_name: "matrix".into(),
                expected: self.num_qudits(),
                got: location.len(),
            });
        }
        for (i, (&qudit, &radix)) in location.iter().zip(self.radices.as_slice()).enumerate() {
            if location[..i].contains(&qudit) {
                return Err(IrError::DuplicateQudit {
                    qudit,
                    gate_name: None,
                });
            }
            let levels = register
                .get(qudit)
                .ok_or_else(|| IrError::QuditOutOfRange {
                    qudit,
                    num_qudits: register.len(),
                    gate_name: None,
                })?;
            if levels != radix {
                return Err(IrError::RadixMismatch {
                    qudit,
                    expected: levels,
                    got: radix,
                    gate_name: None,
                });
            }
        }

        let dim = register.dim()?;
        let mut data = Array2::zeros((dim, dim));
        for col in 0..dim {
            let mut digits = register.digits(col);
            let local_col = self
                .radices
                .index_of(location.iter().map(|q| digits[q.index()]));
            for local_row in 0..self.dim() {
                for (q, digit) in location.iter().zip(self.radices.digits(local_row)) {
                    digits[q.index()] = digit;
                }
                let row = register.index_of(digits.iter().copied());
                data[[row, col]] = self.data[[local_row, local_col]];
            }
        }
        Ok(Self {
            data,
            radices: register.clone(),
        })
    }
}
