use mora::events::{Event, MemorySink};
use mora::time::{instrumented, sleep, timed};
use mora::{Error, RuntimeBuilder};
use std::sync::Arc;
use std::time::Duration;

#[mora::test]
async fn test_instrumented_with_sleep() {
    let (_, elapsed) = instrumented(sleep(Duration::from_millis(50))).await;

    assert!(
        elapsed >= Duration::from_millis(50),
        "instrumented should measure at least the sleep duration"
    );
}

#[mora::test]
async fn test_instrumented_passes_output_through() {
    let (value, _) = instrumented(async { "value" }).await;

    assert_eq!(value, "value");
}

#[test]
fn test_timed_reports_duration() {
    let sink = MemorySink::new();
    let rt = RuntimeBuilder::new().sink(Arc::new(sink.clone())).build();

    let value = rt.block_on(timed(async {
        sleep(Duration::from_millis(30)).await;
        42
    }));

    assert_eq!(value, 42);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Finished { elapsed } => assert!(*elapsed >= Duration::from_millis(30)),
        other => panic!("expected a Finished event, got {other:?}"),
    }
}

#[test]
fn test_timed_propagates_errors() {
    let sink = MemorySink::new();
    let rt = RuntimeBuilder::new().sink(Arc::new(sink.clone())).build();

    let overflow = Error::Overflow {
        operation: "sum",
        left: i64::MAX,
        right: 1,
    };

    let result: mora::Result<i64> = rt.block_on(timed({
        let overflow = overflow.clone();
        async move { Err(overflow) }
    }));

    assert_eq!(result, Err(overflow));
    assert!(matches!(sink.events().as_slice(), [Event::Finished { .. }]));
}

#[test]
fn test_finished_event_display() {
    let event = Event::Finished {
        elapsed: Duration::from_micros(1_500),
    };

    assert_eq!(event.to_string(), "duration: 1.500 ms");
}
