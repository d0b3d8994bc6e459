//! Dense matrix type shared by every transform.

mod dense;
mod format;
mod io;

pub use dense::Matrix;
pub(crate) use dense::check_same_dims;
