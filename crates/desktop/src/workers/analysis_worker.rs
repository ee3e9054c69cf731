use std::thread;

use crossbeam_channel::Receiver;

use people_counter_core::analysis::domain::people_counter::{AnalysisError, PeopleCounter};
use people_counter_core::analysis::infrastructure::http_people_counter::HttpPeopleCounter;
use people_counter_core::form::upload_form::{SubmissionId, SubmissionTicket};

/// Result of one upload, tagged with the submission it belongs to.
pub struct AnalysisDone {
    pub id: SubmissionId,
    pub result: Result<u32, AnalysisError>,
}

/// Spawn a background upload to `endpoint`.
///
/// The HTTP client is built on the worker thread; the blocking client must
/// not be created or dropped on the UI thread's async executor.
pub fn spawn(ticket: SubmissionTicket, endpoint: String) -> Receiver<AnalysisDone> {
    spawn_with(ticket, move || {
        HttpPeopleCounter::new(endpoint).map(|c| Box::new(c) as Box<dyn PeopleCounter>)
    })
}

fn spawn_with<F>(ticket: SubmissionTicket, connect: F) -> Receiver<AnalysisDone>
where
    F: FnOnce() -> Result<Box<dyn PeopleCounter>, AnalysisError> + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::unbounded::<AnalysisDone>();

    thread::spawn(move || {
        let result = connect().and_then(|counter| counter.count_people(&ticket.file));
        let _ = tx.send(AnalysisDone {
            id: ticket.id,
            result,
        });
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use people_counter_core::form::upload_form::{SubmitOutcome, UploadForm};
    use people_counter_core::shared::selected_file::SelectedFile;
    use std::time::Duration;

    struct FixedCounter(u32);

    impl PeopleCounter for FixedCounter {
        fn count_people(&self, _file: &SelectedFile) -> Result<u32, AnalysisError> {
            Ok(self.0)
        }
    }

    fn ticket() -> SubmissionTicket {
        let mut form = UploadForm::new();
        form.select_files([SelectedFile::from_bytes("photo.jpg", vec![0xFF, 0xD8])]);
        match form.begin_submission() {
            SubmitOutcome::Started(ticket) => ticket,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_spawn_with_reports_count() {
        let ticket = ticket();
        let id = ticket.id;

        let rx = spawn_with(ticket, || Ok(Box::new(FixedCounter(7)) as Box<dyn PeopleCounter>));
        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(done.id, id);
        assert_eq!(done.result.unwrap(), 7);
    }

    #[test]
    fn test_connect_failure_is_reported() {
        let rx = spawn_with(ticket(), || {
            Err(AnalysisError::Status {
                url: "http://stub".to_string(),
                status: 503,
            })
        });
        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(matches!(done.result, Err(AnalysisError::Status { status: 503, .. })));
    }
}
