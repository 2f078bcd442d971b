/*!
 * Artifact store
 *
 * Every stage exchanges its inputs and outputs through named text artifacts.
 * `FsStore` keeps them in an instance directory; `MemoryStore` keeps them in
 * memory so stages can be exercised without touching the filesystem.
 */

mod store;

pub use store::*;
