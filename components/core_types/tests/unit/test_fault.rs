//! Unit tests for Fault

use core_types::{Fault, FaultKind, FrameOrigin, FrameTrace};

#[test]
fn constructors_set_kind() {
    assert_eq!(Fault::synchronous("x").kind, FaultKind::Synchronous);
    assert_eq!(Fault::stack_overflow(8).kind, FaultKind::StackOverflow);
    assert_eq!(Fault::rejection("x").kind, FaultKind::Rejection);
}

#[test]
fn fault_implements_error() {
    let fault = Fault::synchronous("oops");
    let err: &dyn std::error::Error = &fault;
    assert!(err.to_string().contains("oops"));
}

#[test]
fn faults_with_same_content_are_equal() {
    assert_eq!(Fault::rejection("t"), Fault::rejection("t"));
    assert_ne!(Fault::rejection("t"), Fault::synchronous("t"));
}

#[test]
fn with_frames_replaces_trace() {
    let frames = vec![
        FrameTrace {
            name: Some("outer".to_string()),
            origin: FrameOrigin::Root,
            depth: 0,
        },
        FrameTrace {
            name: Some("inner".to_string()),
            origin: FrameOrigin::Call,
            depth: 1,
        },
    ];
    let fault = Fault::synchronous("boom").with_frames(frames.clone());
    assert_eq!(fault.frames, frames);
}

#[test]
fn clone_fans_out_identical_faults() {
    let fault = Fault::rejection("network unreachable");
    let copies = vec![fault.clone(), fault.clone()];
    assert!(copies.iter().all(|f| *f == fault));
}
