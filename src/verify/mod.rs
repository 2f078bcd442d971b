/*!
 * Verification oracle
 *
 * Compares the results produced by the pipeline under test against the
 * reference outputs. Every outcome, including unreadable inputs, becomes a
 * `VerifyOutcome` with a report line and a process exit code.
 */

mod verify;

pub use verify::*;

#[cfg(test)]
mod tests;
