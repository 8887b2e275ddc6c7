// Integer approximations of logarithms of powers.
//
// Each formula computes floor (or ceil) of an exact logarithm as
// (e * sig) >> exp. The domains were certified exhaustively against exact
// big-integer comparisons by `gen-pow5 --verify-logs`; outside them the
// results are unspecified.

// floor(log2(5**e)) for -12654 <= e <= 12654.
pub(crate) const fn floor_log2_pow5(e: i32) -> i32 {
    debug_assert!(e >= -12654 && e <= 12654);
    // log2_5_sig = round(log2(5) * 2**log2_5_exp)
    const LOG2_5_SIG: i64 = 38_955_489;
    const LOG2_5_EXP: u32 = 24;
    ((e as i64 * LOG2_5_SIG) >> LOG2_5_EXP) as i32
}

// floor(log10(2**e)) for -2620 <= e <= 2620.
pub(crate) const fn floor_log10_pow2(e: i32) -> i32 {
    debug_assert!(e >= -2620 && e <= 2620);
    // log10_2_sig = round(log10(2) * 2**log10_2_exp)
    const LOG10_2_SIG: i32 = 315_653;
    const LOG10_2_EXP: u32 = 20;
    (e * LOG10_2_SIG) >> LOG10_2_EXP
}

// floor(log10(5**e)) for -2620 <= e <= 2620.
pub(crate) const fn floor_log10_pow5(e: i32) -> i32 {
    debug_assert!(e >= -2620 && e <= 2620);
    // log10_5_sig = round(log10(5) * 2**log10_5_exp)
    const LOG10_5_SIG: i32 = 732_923;
    const LOG10_5_EXP: u32 = 20;
    (e * LOG10_5_SIG) >> LOG10_5_EXP
}

// ceil(log10(2**e)) for -1650 <= e <= 1650.
pub(crate) const fn ceil_log10_pow2(e: i32) -> i32 {
    debug_assert!(e >= -1650 && e <= 1650);
    const LOG10_2_SIG: i32 = 78_913;
    const LOG10_2_EXP: u32 = 18;
    (e * LOG10_2_SIG + ((1 << LOG10_2_EXP) - 1)) >> LOG10_2_EXP
}
