use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde_json::Value;

use crate::domain::FieldDraft;

use super::{SubmitError, Transport};

/// Result of one transmission, as seen by the form.
#[derive(Debug)]
pub enum SubmitOutcome {
    Delivered(Option<Value>),
    Failed(SubmitError),
}

/// Runs transmissions off the UI thread.
///
/// Requests are never cancelled; completions are drained with
/// [`SubmissionWorker::poll`].
pub struct SubmissionWorker {
    request_tx: Sender<FieldDraft>,
    outcome_rx: Receiver<SubmitOutcome>,
}

impl SubmissionWorker {
    pub fn spawn(transport: Arc<dyn Transport>) -> Self {
        let (request_tx, request_rx) = unbounded::<FieldDraft>();
        let (outcome_tx, outcome_rx) = unbounded::<SubmitOutcome>();

        thread::spawn(move || {
            for value in request_rx.iter() {
                let outcome = match transport.submit(&value) {
                    Ok(body) => SubmitOutcome::Delivered(body),
                    Err(err) => SubmitOutcome::Failed(err),
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            outcome_rx,
        }
    }

    pub fn send(&self, value: FieldDraft) {
        if self.request_tx.send(value).is_err() {
            log::error!("submission worker has stopped; request dropped");
        }
    }

    pub fn poll(&self) -> Option<SubmitOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn wait(&self) -> Option<SubmitOutcome> {
        self.outcome_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct EchoTransport {
        seen: Mutex<Vec<FieldDraft>>,
    }

    impl Transport for EchoTransport {
        fn submit(&self, value: &FieldDraft) -> Result<Option<Value>, SubmitError> {
            self.seen.lock().unwrap().push(value.clone());
            if value.label == "fail" {
                Err(SubmitError::Status { status: 500 })
            } else {
                Ok(Some(json!({"ok": true})))
            }
        }
    }

    #[test]
    fn delivers_outcomes_in_order() {
        let transport = Arc::new(EchoTransport {
            seen: Mutex::new(Vec::new()),
        });
        let worker = SubmissionWorker::spawn(transport.clone());
        worker.send(FieldDraft {
            label: "ok".into(),
            ..Default::default()
        });
        worker.send(FieldDraft {
            label: "fail".into(),
            ..Default::default()
        });

        assert!(matches!(
            worker.wait(),
            Some(SubmitOutcome::Delivered(Some(_)))
        ));
        assert!(matches!(
            worker.wait(),
            Some(SubmitOutcome::Failed(SubmitError::Status { status: 500 }))
        ));
        assert_eq!(transport.seen.lock().unwrap().len(), 2);
        assert!(worker.poll().is_none());
    }
}
