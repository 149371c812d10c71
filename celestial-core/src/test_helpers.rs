use crate::matrix::RotationMatrix3;

#[inline]
fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    f64_to_ordered_u64(a).abs_diff(f64_to_ordered_u64(b))
}

#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}",
        ctx
    );
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} b={}",
        ctx,
        d,
        max_ulp,
        a,
        b
    );
}

#[track_caller]
pub fn assert_rotation_matrix(m: &RotationMatrix3, ctx: &str) {
    assert!(
        m.is_rotation_matrix(1e-14),
        "{}: not orthonormal with unit determinant (det = {})\n{}",
        ctx,
        m.determinant(),
        m
    );
}
