//! TensorBoard recorder.
use log::debug;
use racer_core::record::{Record, RecordValue, Recorder};
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
    n_writes: usize,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "env_steps".to_string(),
            n_writes: 0,
        }
    }

    /// Returns the step of the record.
    ///
    /// Records without the step key are placed at the number of records written so far.
    fn step(&self, record: &Record) -> usize {
        match record.get(&self.step_key) {
            Some(RecordValue::Scalar(v)) => (*v).max(0.0) as usize,
            _ => self.n_writes,
        }
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [Record] into a TFRecord.
    ///
    /// This method handles [RecordValue::Scalar] in the [Record].
    /// Other variants are only logged.
    fn write(&mut self, record: Record) {
        let step = self.step(&record);
        self.n_writes += 1;

        for (k, v) in record.iter() {
            if *k != self.step_key {
                match v {
                    RecordValue::Scalar(v) => self.writer.add_scalar(k, *v, step),
                    RecordValue::String(s) => debug!("{} = {} at step {}", k, s, step),
                    RecordValue::DateTime(t) => debug!("{} = {} at step {}", k, t, step),
                };
            }
        }
    }

    fn flush(&mut self) {
        self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_write_creates_event_file() {
        let dir = TempDir::new("tensorboard").unwrap();
        let mut recorder = TensorboardRecorder::new(dir.path());
        let mut record = Record::from_scalar("env_steps", 20000.0);
        record.insert("checkpoint_index", RecordValue::Scalar(1.0));
        record.insert("checkpoint", RecordValue::String("driver_20000_steps".into()));
        recorder.write(record);
        recorder.write(Record::from_scalar("episode_return", 1.5));
        recorder.flush();

        assert_eq!(recorder.n_writes, 2);
        assert_eq!(recorder.step(&Record::from_scalar("env_steps", 40000.0)), 40000);
        assert_eq!(recorder.step(&Record::from_scalar("env_steps", -3.0)), 0);
        assert_eq!(recorder.step(&Record::from_scalar("episode_return", 1.0)), 2);
        let n_files = std::fs::read_dir(dir.path()).unwrap().count();
        assert!(n_files >= 1);
    }
}
