use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use csv::{ReaderBuilder, StringRecordsIntoIter};

use crate::stream::error::StreamError;
use crate::stream::sample::Sample;

/// Lazily yields one parsed fix per pacing interval from a headerless
/// comma-separated dataset. Single pass; replaying requires reopening.
pub struct SampleSource<R: Read = File> {
    records: StringRecordsIntoIter<R>,
    interval: Duration,
    row: usize,
}

impl<R: Read> std::fmt::Debug for SampleSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSource")
            .field("interval", &self.interval)
            .field("row", &self.row)
            .finish()
    }
}

impl SampleSource<File> {
    pub fn open(path: impl AsRef<Path>, interval: Duration) -> Result<Self, StreamError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file, interval))
    }
}

impl<R: Read> SampleSource<R> {
    pub fn from_reader(reader: R, interval: Duration) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        Self {
            records,
            interval,
            row: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Next fix, one pacing interval after the previous one. The sleep is a
    /// suspension point: a caller racing this against a stop signal abandons
    /// the wait without receiving further values. A row that does not parse
    /// comes back as `MalformedSample`; `None` means the dataset is
    /// exhausted.
    pub async fn next(&mut self) -> Option<Result<Sample, StreamError>> {
        let record = self.records.next()?;
        self.row += 1;

        tokio::time::sleep(self.interval).await;

        Some(match record {
            Ok(record) => Sample::from_record(self.row, &record),
            Err(e) => Err(StreamError::MalformedSample(self.row, e.to_string())),
        })
    }
}
