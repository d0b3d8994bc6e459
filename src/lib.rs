//! Transforms for compositional data analysis.
//!
//! Compositions are vectors of positive parts of a whole (proportions,
//! relative abundances). They live on the Aitchison simplex, where ordinary
//! multivariate statistics do not apply directly. This library maps them to
//! Euclidean space so that they do.
//!
//! # Overview
//!
//! - **matrix**: dense row-major [`Matrix`] (rows = observations, columns =
//!   parts) with CSV load/store and text renderings
//! - **transform**: closure ([`clo()`]), centered and additive log-ratio
//!   ([`clr()`], [`alr()`]), centered and additive planar ([`cpt()`], [`apt()`])
//! - **math**: small numeric helpers
//!
//! # Example
//!
//! ```
//! use compositions::{alr, Matrix};
//!
//! let data = Matrix::from_rows(vec![vec![2.0, 4.0, 8.0]])?;
//! let mut out = Matrix::new(1, 2);
//! alr(&data, &mut out)?;
//! assert!((out[(0, 1)] - 0.5_f64.ln()).abs() < 1e-12);
//! # Ok::<(), compositions::CompositionError>(())
//! ```

pub mod error;
pub mod math;
pub mod matrix;
pub mod transform;

pub use error::{CompositionError, Result};
pub use matrix::Matrix;
pub use transform::{
    alr, apt, clo, clr, cpt, transform, DegeneracyPolicy, Transform, TransformConfig,
};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::error::{CompositionError, Result};
    pub use crate::matrix::Matrix;
    pub use crate::transform::{
        alr, alr_with, apt, apt_with, clo, clo_with, clr, clr_with, cpt, cpt_with, transform,
        DegeneracyPolicy, Transform, TransformConfig,
    };
}
