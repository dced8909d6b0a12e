//! Background segmentation worker.
//!
//! Runs the same [`Segmenter`] as the direct call path on a dedicated thread
//! so callers never block on large routes. Every request carries a
//! caller-visible [`RequestId`] and every response (success or failure) is
//! tagged with it. [`SegmentationClient`] layers last-request-wins on top:
//! responses to anything but the most recently issued request are dropped.

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SegmentError, WorkerError};
use crate::haversine::Haversine;
use crate::polyline::RouteGeometry;
use crate::segmenter::{SegmentedRoute, Segmenter};
use crate::traits::DistanceMetric;

/// Opaque identifier correlating a request with its response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationRequest {
    pub request_id: RequestId,
    pub route_id: String,
    pub geometry: RouteGeometry,
    pub spacing_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationResponse {
    pub request_id: RequestId,
    pub route_id: String,
    pub outcome: Result<SegmentedRoute, SegmentError>,
}

/// Handle to a segmentation thread.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct SegmentationWorker {
    requests: Option<Sender<SegmentationRequest>>,
    responses: Receiver<SegmentationResponse>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SegmentationWorker {
    /// Spawn the worker thread around `segmenter`.
    pub fn spawn<M>(segmenter: Segmenter<M>) -> Result<Self, WorkerError>
    where
        M: DistanceMetric + Send + 'static,
    {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<SegmentationRequest>();
        let (response_tx, response_rx) = crossbeam_channel::unbounded::<SegmentationResponse>();

        let handle = thread::Builder::new()
            .name("route-segmenter".into())
            .spawn(move || run_worker(segmenter, request_rx, response_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    /// Queue a request; the response arrives on [`Self::responses`].
    pub fn submit(&self, request: SegmentationRequest) -> Result<(), WorkerError> {
        let sender = self.requests.as_ref().ok_or(WorkerError::Disconnected)?;
        sender.send(request).map_err(|_| WorkerError::Disconnected)
    }

    pub fn responses(&self) -> &Receiver<SegmentationResponse> {
        &self.responses
    }

    /// Stop accepting requests and wait for queued ones to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("segmentation worker thread panicked");
            }
        }
    }
}

impl Drop for SegmentationWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker<M: DistanceMetric>(
    segmenter: Segmenter<M>,
    requests: Receiver<SegmentationRequest>,
    responses: Sender<SegmentationResponse>,
) {
    let span = tracing::info_span!("segmentation.worker");
    let _guard = span.enter();
    info!("segmentation worker started");

    for request in requests {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            segmenter.segment(&request.route_id, &request.geometry, request.spacing_km)
        }))
        .unwrap_or_else(|payload| Err(SegmentError::Internal(panic_message(payload.as_ref()))));

        if let Err(err) = &outcome {
            warn!(request_id = %request.request_id, route_id = %request.route_id, %err, "segmentation failed");
        } else {
            debug!(request_id = %request.request_id, route_id = %request.route_id, "segmentation finished");
        }

        let response = SegmentationResponse {
            request_id: request.request_id,
            route_id: request.route_id,
            outcome,
        };
        if responses.send(response).is_err() {
            debug!("response receiver dropped, stopping");
            break;
        }
    }

    info!("segmentation worker stopped");
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during segmentation".to_string()
    }
}

/// Caller side of the worker with last-request-wins semantics.
pub struct SegmentationClient {
    worker: SegmentationWorker,
    next_sequence: u64,
    latest: Option<RequestId>,
}

impl SegmentationClient {
    pub fn new(worker: SegmentationWorker) -> Self {
        Self {
            worker,
            next_sequence: 0,
            latest: None,
        }
    }

    /// Spawn a worker with the default haversine segmenter.
    pub fn spawn_default() -> Result<Self, WorkerError> {
        SegmentationWorker::spawn(Segmenter::<Haversine>::default()).map(Self::new)
    }

    /// Issue a request, superseding any earlier one.
    pub fn request(
        &mut self,
        route_id: impl Into<String>,
        geometry: RouteGeometry,
        spacing_km: f64,
    ) -> Result<RequestId, WorkerError> {
        self.next_sequence += 1;
        let request_id = RequestId(format!("segment-{}", self.next_sequence));
        self.request_with_id(request_id.clone(), route_id, geometry, spacing_km)?;
        Ok(request_id)
    }

    /// Issue a request under a caller-chosen identifier.
    pub fn request_with_id(
        &mut self,
        request_id: RequestId,
        route_id: impl Into<String>,
        geometry: RouteGeometry,
        spacing_km: f64,
    ) -> Result<(), WorkerError> {
        self.latest = Some(request_id.clone());
        self.worker.submit(SegmentationRequest {
            request_id,
            route_id: route_id.into(),
            geometry,
            spacing_km,
        })
    }

    pub fn latest_request(&self) -> Option<&RequestId> {
        self.latest.as_ref()
    }

    /// True when `response` answers the most recently issued request.
    pub fn is_current(&self, response: &SegmentationResponse) -> bool {
        self.latest.as_ref() == Some(&response.request_id)
    }

    /// Drain ready responses without blocking; returns the one for the
    /// latest request if it has arrived.
    pub fn latest_response(&mut self) -> Result<Option<SegmentationResponse>, WorkerError> {
        loop {
            match self.worker.responses().try_recv() {
                Ok(response) if self.is_current(&response) => return Ok(Some(response)),
                Ok(stale) => debug!(request_id = %stale.request_id, "discarding stale response"),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }

    /// Block until the latest request's response arrives or `timeout` passes.
    pub fn wait_latest(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<SegmentationResponse>, WorkerError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.worker.responses().recv_timeout(remaining) {
                Ok(response) if self.is_current(&response) => return Ok(Some(response)),
                Ok(stale) => debug!(request_id = %stale.request_id, "discarding stale response"),
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }

    pub fn shutdown(self) {
        self.worker.shutdown();
    }
}
