/*!
 * AES block cipher engine
 *
 * This module packs integer datasets into big-endian AES blocks and
 * encrypts or decrypts them with AES-128 in ECB (toy instance) or CTR
 * (general instances) mode.
 */

mod aes;

pub use self::aes::*;

#[cfg(test)]
mod tests;
