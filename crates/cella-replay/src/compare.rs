//! Replay verification.

use std::io::Read;

use cella_engine::Engine;

use crate::error::ReplayError;
use crate::reader::ReplayReader;

/// The first step whose replayed hash differs from the recorded one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Step number from the frame.
    pub step: u64,
    /// Hash stored in the log.
    pub recorded: u64,
    /// Hash produced by replaying.
    pub replayed: u64,
}

/// Re-apply every logged command to `engine` and compare state hashes.
///
/// The engine's state must match the header's `initial_hash`, otherwise
/// [`ReplayError::InitialStateMismatch`] is returned before any command
/// runs. Command failures are ignored, as the batch driver does; they
/// are part of the recorded behaviour.
///
/// Returns `Ok(None)` when every frame matches.
pub fn replay_and_compare<R: Read>(
    mut reader: ReplayReader<R>,
    engine: &mut Engine,
) -> Result<Option<Divergence>, ReplayError> {
    let current = engine.state().stable_hash();
    let recorded = reader.header().initial_hash;
    if current != recorded {
        return Err(ReplayError::InitialStateMismatch { recorded, current });
    }

    while let Some(frame) = reader.next_frame()? {
        if let Err(e) = engine.apply(&frame.command) {
            log::debug!("step {}: command failed during replay: {e}", frame.step);
        }
        let replayed = engine.state().stable_hash();
        if replayed != frame.state_hash {
            log::warn!(
                "replay diverged at step {}: recorded={:#018x}, replayed={replayed:#018x}",
                frame.step,
                frame.state_hash
            );
            return Ok(Some(Divergence {
                step: frame.step,
                recorded: frame.state_hash,
                replayed,
            }));
        }
    }
    Ok(None)
}
