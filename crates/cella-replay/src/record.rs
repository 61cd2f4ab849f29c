//! Run a command batch while recording it.

use std::io::Write;

use cella_engine::{BatchReport, Command, Engine};

use crate::error::ReplayError;
use crate::writer::ReplayWriter;

/// Apply `commands` to `engine` like [`run_batch`](cella_engine::run_batch)
/// and write one frame per command.
///
/// Failed commands are recorded too, with the hash of the unchanged
/// state; only I/O failures abort the run.
pub fn record_batch<'a, I, W>(
    engine: &mut Engine,
    commands: I,
    writer: &mut ReplayWriter<W>,
) -> Result<BatchReport, ReplayError>
where
    I: IntoIterator<Item = &'a Command>,
    W: Write,
{
    let mut report = BatchReport::default();
    for (index, command) in commands.into_iter().enumerate() {
        report.apply(engine, index, command);
        writer.write_step(index as u64, command, &engine.state())?;
    }
    log::info!(
        "recorded {} frame(s): {} ok, {} failed",
        writer.frames_written(),
        report.succeeded,
        report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReplayHeader;
    use cella_core::ObjectId;
    use cella_engine::run_batch;
    use cella_test_utils::single;

    #[test]
    fn report_matches_unrecorded_batch() {
        let cmds = vec![
            Command::Place {
                id: ObjectId::from("a"),
                footprint: single(0, 0, 0),
            },
            Command::Remove {
                id: ObjectId::from("ghost"),
            },
            Command::Redo,
        ];
        let expected = run_batch(&mut Engine::new(), &cmds);

        let mut engine = Engine::new();
        let header = ReplayHeader::for_engine(&engine);
        let mut writer = ReplayWriter::new(Vec::new(), &header).unwrap();
        let report = record_batch(&mut engine, &cmds, &mut writer).unwrap();
        assert_eq!(report, expected);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(writer.frames_written(), 3);
    }
}
