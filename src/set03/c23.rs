// Clone an MT19937 RNG from its output

use crate::mt19937::{Mt19937, B, C, L, N, S, T, U};

/// Rebuild a generator from `N` consecutive outputs.
///
/// The clone's next output is the original's next output.
pub fn clone_mt19937_from_outputs(outputs: &[u32; N]) -> Mt19937 {
    Mt19937::from_state(outputs.map(untemper))
}

/// Tap `N` outputs from `rng` and return a clone of it.
pub fn clone_mt19937_from_output(rng: &mut Mt19937) -> Mt19937 {
    let outputs: [u32; N] = std::array::from_fn(|_| rng.generate());
    clone_mt19937_from_outputs(&outputs)
}

/// Invert MT19937's output tempering.
pub fn untemper(value: u32) -> u32 {
    let mut v = invert_right_shift_xor(value, L);
    v = invert_left_shift_and_xor(v, T, C);
    v = invert_left_shift_and_xor(v, S, B);
    invert_right_shift_xor(v, U)
}

// Undo x = y ^ (y >> shift).
//
// Numbering bits from the most significant (bit 0), x[i] = y[i] ^ y[i - shift].
// The top `shift` bits of x are the top bits of y untouched, and each later
// bit follows from one we already have: y[i] = x[i] ^ y[i - shift].
fn invert_right_shift_xor(x: u32, shift: u32) -> u32 {
    let mut y = x;
    for i in (0..(32 - shift)).rev() {
        let recovered_bit = (y >> (i + shift)) & 1;
        y ^= recovered_bit << i;
    }
    y
}

// Undo x = y ^ ((y << shift) & mask).
//
// Numbering bits from the least significant, the low `shift` bits of x are
// the low bits of y, and above those y[i] = x[i] ^ (y[i - shift] & mask[i]).
fn invert_left_shift_and_xor(x: u32, shift: u32, mask: u32) -> u32 {
    let mut y = x;
    for i in shift..32 {
        let recovered_bit = y >> (i - shift);
        let mask_bit = mask >> i;
        y ^= ((recovered_bit & mask_bit) & 1) << i;
    }
    y
}
