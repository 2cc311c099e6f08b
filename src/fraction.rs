//! Rational approximation of duration weights.
//!
//! Duration weights arrive as floats but LilyPond wants exact fractions
//! (`4*3/2` for a dotted quarter). A continued-fraction expansion recovers
//! the smallest fraction that matches the float, with a cutoff that stops
//! near-integer floating-point noise from unrolling forever.

/// Continued-fraction term list of `f`.
///
/// Repeatedly takes the integer part and inverts the remainder. Stops when
/// the remainder is exactly zero, or when the inverted remainder exceeds
/// 1e7 (a term that large only ever comes from float noise; truncating
/// there keeps the result small and is silent, not an error).
fn terms(mut f: f64) -> Vec<i64> {
    let mut out = Vec::new();
    while f != 0.0 {
        let t = f.floor();
        out.push(t as i64);
        f -= t;
        if f != 0.0 {
            f = 1.0 / f;
        }
        if f > 1e7 {
            break;
        }
    }
    out
}

/// Best small-fraction approximation of `f` as `(numerator, denominator)`.
///
/// Folds the continued-fraction terms back up in reverse with the standard
/// continuant recurrence. Exact for every fraction whose expansion fits
/// under the term guard: `approximate(1.5) == (3, 2)`.
///
/// `approximate(0.0)` returns `(1, 0)`; callers must treat a zero duration
/// as a no-op instead of formatting the zero denominator.
pub fn approximate(f: f64) -> (i64, i64) {
    let mut x = 0i64;
    let mut y = 1i64;
    for &t in terms(f).iter().rev() {
        let next = x + t * y;
        x = y;
        y = next;
    }
    (y, x)
}

/// Format a duration weight as a LilyPond quarter-note multiplier token.
pub fn duration_token(f: f64) -> String {
    let (num, den) = approximate(f);
    format!("4*{}/{}", num, den)
}
