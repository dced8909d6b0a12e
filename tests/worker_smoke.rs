//! Background worker smoke tests.
//!
//! Exercises the message-passing path the way an interactive caller would:
//! many rapid requests, only the newest answer kept.

mod fixtures;

use std::time::Duration;

use fixtures::*;
use route_segmenter::worker::{
    RequestId, SegmentationClient, SegmentationRequest, SegmentationWorker,
};
use route_segmenter::{RouteGeometry, SegmentError, Segmenter};

const TIMEOUT: Duration = Duration::from_secs(10);

#[test]
fn worker_matches_direct_call() {
    let points = strip_route();
    let direct = Segmenter::default().segment_points("strip", &points, 0.8).unwrap();

    let worker = SegmentationWorker::spawn(Segmenter::default()).unwrap();
    worker
        .submit(SegmentationRequest {
            request_id: RequestId::from("r-1"),
            route_id: "strip".into(),
            geometry: RouteGeometry::Coordinates(points),
            spacing_km: 0.8,
        })
        .unwrap();

    let response = worker.responses().recv_timeout(TIMEOUT).unwrap();
    assert_eq!(response.request_id, RequestId::from("r-1"));
    assert_eq!(response.outcome.unwrap(), direct);
}

#[test]
fn slider_drag_keeps_last_request() {
    let mut client = SegmentationClient::spawn_default().unwrap();
    let points = strip_route();

    let mut last = None;
    for step in 1..=20 {
        let spacing = 0.1 * step as f64;
        last = Some(
            client
                .request("strip", RouteGeometry::Coordinates(points.clone()), spacing)
                .unwrap(),
        );
    }

    let response = client.wait_latest(TIMEOUT).unwrap().expect("latest response");
    assert_eq!(Some(response.request_id), last);
    let route = response.outcome.unwrap();
    assert!((route.spacing_km - 2.0).abs() < 1e-12);

    // Everything older was discarded; nothing else is pending for us.
    assert!(client.latest_response().unwrap().is_none());
    client.shutdown();
}

#[test]
fn failures_are_tagged_and_superseded() {
    let mut client = SegmentationClient::spawn_default().unwrap();

    let bad = client
        .request("strip", RouteGeometry::Coordinates(strip_route()), -5.0)
        .unwrap();
    let response = client.wait_latest(TIMEOUT).unwrap().expect("error response");
    assert_eq!(response.request_id, bad);
    assert_eq!(response.outcome, Err(SegmentError::InvalidSpacing(-5.0)));

    let good = client
        .request("strip", RouteGeometry::Coordinates(strip_route()), 1.0)
        .unwrap();
    let response = client.wait_latest(TIMEOUT).unwrap().expect("success response");
    assert_eq!(response.request_id, good);
    assert!(response.outcome.is_ok());
}

#[test]
fn caller_supplied_request_ids_pass_through() {
    let mut client = SegmentationClient::spawn_default().unwrap();
    client
        .request_with_id(
            RequestId::from("ui-42"),
            "henderson",
            RouteGeometry::Coordinates(henderson_route()),
            2.0,
        )
        .unwrap();

    let response = client.wait_latest(TIMEOUT).unwrap().expect("response");
    assert_eq!(response.request_id.to_string(), "ui-42");
    assert_eq!(response.route_id, "henderson");
}
