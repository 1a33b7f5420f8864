use std::sync::Mutex;

use services::SubmissionError;
use services::media::{AnalysisFuture, AnalysisSink, DispatchMetadata, MediaBlob};

/// Analysis sink that remembers what it was sent.
#[derive(Default)]
pub struct RecordingAnalysis {
    reject_with: Option<u16>,
    sent: Mutex<Vec<(DispatchMetadata, usize)>>,
}

impl RecordingAnalysis {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    /// Metadata and video size of every upload received.
    pub fn sent(&self) -> Vec<(DispatchMetadata, usize)> {
        self.sent.lock().unwrap().clone()
    }
}

impl AnalysisSink for RecordingAnalysis {
    fn submit<'a>(&'a self, blob: &'a MediaBlob, metadata: &'a DispatchMetadata) -> AnalysisFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push((metadata.clone(), blob.size()));
            match self.reject_with {
                Some(status) => Err(SubmissionError::Upstream {
                    status: Some(status),
                    message: format!("analysis endpoint returned {status}"),
                }),
                None => Ok(()),
            }
        })
    }
}
