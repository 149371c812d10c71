mod iau2006;

pub use iau2006::PrecessionIAU2006;

use crate::matrix::RotationMatrix3;

/// Output of [`PrecessionIAU2006::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionResult {
    /// Constant GCRS to mean J2000.0 frame bias.
    pub bias_matrix: RotationMatrix3,
    /// Mean J2000.0 to mean of date.
    pub precession_matrix: RotationMatrix3,
    /// GCRS to mean of date, `precession * bias`.
    pub bias_precession_matrix: RotationMatrix3,
}
