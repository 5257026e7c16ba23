//! Safe arithmetic helpers - no unwrap, no panics, no as casts

/// Add u128 with saturation at MAX
pub fn add_u128(a: u128, b: u128) -> u128 {
    a.saturating_add(b)
}

/// Subtract u128 with saturation at 0
pub fn sub_u128(a: u128, b: u128) -> u128 {
    a.saturating_sub(b)
}

/// Multiply u128 with saturation
pub fn mul_u128(a: u128, b: u128) -> u128 {
    a.saturating_mul(b)
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}

/// Minimum of two u64
pub fn min_u64(a: u64, b: u64) -> u64 {
    if a < b { a } else { b }
}

/// floor(a * num / den) for num <= den, exact over the whole u128 range.
///
/// Splits `a` into quotient and remainder by `den` so the only product
/// formed is `(a % den) * num < den * den`. Returns 0 if `den` is 0 and
/// clamps `num` to `den`.
pub fn mul_div_floor(a: u128, num: u128, den: u128) -> u128 {
    if den == 0 {
        return 0;
    }
    let num = min_u128(num, den);
    let whole = mul_u128(a / den, num);
    let part = mul_u128(a % den, num) / den;
    add_u128(whole, part)
}
