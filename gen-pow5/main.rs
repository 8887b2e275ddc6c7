// Generates the table of 128-bit power of 5 significands in src/pow5.rs.
//
//   cargo run -p gen-pow5
//   cargo run -p gen-pow5 -- --verify-logs

use num_bigint::BigUint as Uint;
use num_integer::Integer as _;

const MIN_DEC_EXP: i32 = -342;
const MAX_DEC_EXP: i32 = 325;
const NUM_BITS: u64 = 128;

fn main() {
    if std::env::args().any(|arg| arg == "--verify-logs") {
        verify_logs();
        return;
    }

    for dec_exp in MIN_DEC_EXP..=MAX_DEC_EXP {
        let pow5 = Uint::from(5_u8).pow(dec_exp.unsigned_abs());
        let bits = pow5.bits();
        let result = if dec_exp < 0 {
            // 2**-e / 5**-k rounded up, with e chosen so the quotient has
            // exactly NUM_BITS bits.
            let num = Uint::from(1_u8) << (bits - 1 + NUM_BITS);
            let (quot, rem) = num.div_rem(&pow5);
            if rem == Uint::default() {
                quot
            } else {
                quot + 1_u8
            }
        } else if bits <= NUM_BITS {
            pow5 << (NUM_BITS - bits)
        } else {
            pow5 >> (bits - NUM_BITS)
        };
        assert_eq!(result.bits(), NUM_BITS);
        let hi = &result >> 64;
        let lo = result & ((Uint::from(1_u8) << 64) - 1_u8);
        println!("    ({hi:#018x}, {lo:#018x}), // {dec_exp:4}");
    }
}

fn decimal_digits(n: &Uint) -> i32 {
    n.to_string().len() as i32
}

// Checks the fixed-point logarithms in src/log.rs against exact values.
fn verify_logs() {
    let mut pow5 = Uint::from(1_u8);
    for e in 0..=12654_i32 {
        // 5**e is never a power of 2 for e > 0, so its bit length is
        // ceil(log2(5**e)).
        let bits = pow5.bits() as i32;
        assert_eq!(floor_log2_pow5(e), bits - 1, "floor_log2_pow5({e})");
        if e > 0 {
            assert_eq!(floor_log2_pow5(-e), -bits, "floor_log2_pow5({})", -e);
        }
        pow5 *= 5_u8;
    }

    let mut pow2 = Uint::from(1_u8);
    let mut pow5 = Uint::from(1_u8);
    for e in 0..=2620_i32 {
        let digits2 = decimal_digits(&pow2);
        let digits5 = decimal_digits(&pow5);
        assert_eq!(floor_log10_pow2(e), digits2 - 1, "floor_log10_pow2({e})");
        assert_eq!(floor_log10_pow5(e), digits5 - 1, "floor_log10_pow5({e})");
        if e > 0 {
            assert_eq!(floor_log10_pow2(-e), -digits2, "floor_log10_pow2({})", -e);
            assert_eq!(floor_log10_pow5(-e), -digits5, "floor_log10_pow5({})", -e);
        }
        if e <= 1650 {
            let ceil = if e == 0 { 0 } else { digits2 };
            assert_eq!(ceil_log10_pow2(e), ceil, "ceil_log10_pow2({e})");
            assert_eq!(ceil_log10_pow2(-e), -(digits2 - 1), "ceil_log10_pow2({})", -e);
        }
        pow2 <<= 1;
        pow5 *= 5_u8;
    }
    println!("ok");
}

fn floor_log2_pow5(e: i32) -> i32 {
    ((i64::from(e) * 38_955_489) >> 24) as i32
}

fn floor_log10_pow2(e: i32) -> i32 {
    (e * 315_653) >> 20
}

fn floor_log10_pow5(e: i32) -> i32 {
    (e * 732_923) >> 20
}

fn ceil_log10_pow2(e: i32) -> i32 {
    (e * 78_913 + ((1 << 18) - 1)) >> 18
}
