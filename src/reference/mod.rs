/*!
 * Cleartext reference
 *
 * Decrypts the encrypted dataset independently of the pipeline under test and
 * derives the ground truth it must reproduce: the decrypted sequence and the
 * two miniworkload scalars (maximum and truncated inner product).
 */

mod reference;

pub use reference::*;
