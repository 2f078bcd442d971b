/*!
 * Key and IV derivation
 *
 * Derives the AES-128 key and the CTR initial counter deterministically from
 * the harness seed, so every stage of a run agrees on the same material.
 */

mod keygen;

pub use keygen::*;
