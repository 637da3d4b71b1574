//! Background worker for network-bound AI calls.
//!
//! The worker thread owns no application state: it receives requests, calls the
//! service, and sends results back. The event loop drains responses and applies
//! them; a stale response is still applied.

use super::{extract_activities, smart_insights, AiError, TextService};
use crate::domain::{Activity, ExtractedActivity};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long drop waits for an in-flight request before detaching the thread
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub enum AiRequest {
    Insights(Vec<Activity>),
    Extract {
        file_name: String,
        bytes: Vec<u8>,
        mime_type: String,
    },
}

#[derive(Debug)]
pub enum AiResponse {
    Insights(String),
    Extracted {
        file_name: String,
        result: Result<Vec<ExtractedActivity>, AiError>,
    },
}

/// Handle to the worker thread; dropping it shuts the worker down, detaching it
/// if a request is still in flight after a short grace period
pub struct AiWorker {
    request_tx: Option<Sender<AiRequest>>,
    response_rx: Receiver<AiResponse>,
    handle: Option<JoinHandle<()>>,
}

impl AiWorker {
    pub fn spawn(service: Arc<dyn TextService>) -> Self {
        let (request_tx, request_rx) = unbounded::<AiRequest>();
        let (response_tx, response_rx) = unbounded::<AiResponse>();

        let handle = thread::spawn(move || run_worker(service, request_rx, response_tx));

        Self {
            request_tx: Some(request_tx),
            response_rx,
            handle: Some(handle),
        }
    }

    /// Queue a request; returns false if the worker is gone
    pub fn submit(&self, request: AiRequest) -> bool {
        match &self.request_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    /// Next finished response, if any (non-blocking)
    pub fn try_recv(&self) -> Option<AiResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next response arrives
    #[cfg(test)]
    pub fn recv(&self) -> Option<AiResponse> {
        self.response_rx.recv().ok()
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.request_tx.take();
        let Some(handle) = self.handle.take() else {
            return;
        };

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        if !handle.is_finished() {
            warn!("ai worker busy on exit; detaching");
            return;
        }
        if handle.join().is_err() {
            warn!("ai worker panicked");
        }
    }
}

fn run_worker(service: Arc<dyn TextService>, requests: Receiver<AiRequest>, responses: Sender<AiResponse>) {
    info!("ai worker started");
    for request in requests {
        let response = match request {
            AiRequest::Insights(activities) => {
                debug!(count = activities.len(), "ai worker: insights");
                AiResponse::Insights(smart_insights(service.as_ref(), &activities))
            }
            AiRequest::Extract {
                file_name,
                bytes,
                mime_type,
            } => {
                debug!(%file_name, %mime_type, "ai worker: extract");
                let result = extract_activities(service.as_ref(), &bytes, &mime_type);
                AiResponse::Extracted { file_name, result }
            }
        };

        if responses.send(response).is_err() {
            break;
        }
    }
    info!("ai worker stopped");
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockTextService;
    use super::super::GenerateRequest;
    use super::*;

    #[test]
    fn test_worker_round_trip() {
        let service = Arc::new(MockTextService::new(vec![
            Ok(Some("Start small.".to_string())),
            Ok(Some(r#"[{"name":"Quiz","duration":10}]"#.to_string())),
        ]));
        let worker = AiWorker::spawn(service);

        assert!(worker.submit(AiRequest::Insights(vec![Activity::new("A", 5, "#6366f1")])));
        match worker.recv() {
            Some(AiResponse::Insights(text)) => assert_eq!(text, "Start small."),
            other => panic!("unexpected response: {:?}", other),
        }

        assert!(worker.submit(AiRequest::Extract {
            file_name: "notes.png".to_string(),
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        }));
        match worker.recv() {
            Some(AiResponse::Extracted { file_name, result }) => {
                assert_eq!(file_name, "notes.png");
                assert_eq!(result.unwrap()[0].name, "Quiz");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    struct SlowService(Duration);

    impl TextService for SlowService {
        fn generate(&self, _request: &GenerateRequest) -> Result<Option<String>, AiError> {
            thread::sleep(self.0);
            Ok(None)
        }
    }

    #[test]
    fn test_drop_does_not_wait_for_in_flight_request() {
        let worker = AiWorker::spawn(Arc::new(SlowService(Duration::from_secs(5))));
        assert!(worker.submit(AiRequest::Insights(vec![Activity::new("A", 5, "#6366f1")])));
        thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_drop_joins_idle_worker() {
        let worker = AiWorker::spawn(Arc::new(MockTextService::new(Vec::new())));
        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < SHUTDOWN_GRACE);
    }

    #[test]
    fn test_try_recv_when_idle() {
        let worker = AiWorker::spawn(Arc::new(MockTextService::new(Vec::new())));
        assert!(worker.try_recv().is_none());
    }
}
