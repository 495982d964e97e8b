use mora::events::{Event, MemorySink};
use mora::exercises::{
    self, Exercise, Operations, chained, concurrent, sequential_dependent, sequential_independent,
};
use mora::latency::Delay;
use mora::time::timed;
use mora::{Error, Runtime, RuntimeBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(60);

fn ops() -> Operations {
    Operations::new(Delay::fixed(DELAY))
}

fn runtime_with_sink() -> (Runtime, MemorySink) {
    let sink = MemorySink::new();
    let rt = RuntimeBuilder::new().sink(Arc::new(sink.clone())).build();

    (rt, sink)
}

fn operation_events(sink: &MemorySink) -> Vec<String> {
    sink.events()
        .iter()
        .filter(|event| !matches!(event, Event::Sleeping { .. }))
        .map(ToString::to_string)
        .collect()
}

#[mora::test]
async fn test_increment_adds_one() {
    let ops = Operations::new(Delay::none());

    for n in [-3, 0, 1, 41, 1_000_000] {
        assert_eq!(ops.increment.call(n).await, Ok(n + 1));
    }
}

#[mora::test]
async fn test_double_multiplies_by_two() {
    let ops = Operations::new(Delay::none());

    for n in [-3, 0, 1, 5, 1_000_000] {
        assert_eq!(ops.double.call(n).await, Ok(n * 2));
    }
}

#[mora::test]
async fn test_sequential_dependent() {
    let ops = ops();
    let start = Instant::now();

    assert_eq!(sequential_dependent(&ops, 4).await, Ok(15));
    assert!(start.elapsed() >= DELAY * 2);
}

#[mora::test]
async fn test_sequential_independent() {
    let ops = ops();
    let start = Instant::now();

    assert_eq!(sequential_independent(&ops, 5, 2).await, Ok(10));
    assert!(start.elapsed() >= DELAY * 2);
}

#[mora::test]
async fn test_concurrent_matches_sequential_but_overlaps() {
    let ops = ops();
    let start = Instant::now();

    assert_eq!(concurrent(&ops, 5, 2).await, Ok(10));

    let elapsed = start.elapsed();
    assert!(elapsed >= DELAY);
    assert!(
        elapsed < DELAY * 2,
        "concurrent delays should overlap, took {elapsed:?}"
    );
}

#[mora::test]
async fn test_concurrent_takes_the_longer_delay() {
    let ops = Operations::with_delays(
        Delay::fixed(Duration::from_millis(20)),
        Delay::fixed(Duration::from_millis(90)),
    );
    let start = Instant::now();

    assert_eq!(concurrent(&ops, 5, 2).await, Ok(10));

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(90));
    assert!(elapsed < Duration::from_millis(110 + 20));
}

#[mora::test]
async fn test_chained() {
    let ops = ops();

    assert_eq!(chained(&ops, 4).await, Ok(10));
}

#[mora::test]
async fn test_every_exercise_produces_its_expected_result() {
    let ops = Operations::new(Delay::none());

    for exercise in Exercise::ALL {
        assert_eq!(
            exercise.run(&ops).await,
            Ok(exercise.expected()),
            "{exercise}"
        );
    }
}

#[test]
fn test_sequential_dependent_event_order() {
    let (rt, sink) = runtime_with_sink();
    let ops = Operations::new(Delay::fixed(Duration::from_millis(5)));

    assert_eq!(rt.block_on(sequential_dependent(&ops, 4)), Ok(15));
    assert_eq!(
        operation_events(&sink),
        [
            "increment started",
            "increment ended",
            "double started",
            "double ended",
        ]
    );
}

#[test]
fn test_concurrent_starts_both_before_either_ends() {
    let (rt, sink) = runtime_with_sink();
    let ops = Operations::new(Delay::fixed(Duration::from_millis(5)));

    assert_eq!(rt.block_on(concurrent(&ops, 5, 2)), Ok(10));
    assert_eq!(
        operation_events(&sink),
        [
            "increment started",
            "double started",
            "increment ended",
            "double ended",
        ]
    );
}

#[test]
fn test_chained_event_order() {
    let (rt, sink) = runtime_with_sink();
    let ops = Operations::new(Delay::none());

    assert_eq!(rt.block_on(chained(&ops, 4)), Ok(10));
    assert_eq!(
        operation_events(&sink),
        [
            "increment started",
            "increment ended",
            "double started",
            "double ended",
        ]
    );
}

#[test]
fn test_timed_exercise_reports_duration_last() {
    let (rt, sink) = runtime_with_sink();
    let ops = Operations::new(Delay::fixed(Duration::from_millis(10)));

    let result = rt.block_on(timed(exercises::sequential_independent(&ops, 5, 2)));

    assert_eq!(result, Ok(10));
    match sink.events().last() {
        Some(Event::Finished { elapsed }) => assert!(*elapsed >= Duration::from_millis(20)),
        other => panic!("expected Finished last, got {other:?}"),
    }
}

#[mora::test]
async fn test_overflow_propagates_through_sequential_composition() {
    let ops = Operations::new(Delay::none());

    assert_eq!(
        sequential_dependent(&ops, i64::MAX).await,
        Err(Error::Overflow {
            operation: "increment",
            left: i64::MAX,
            right: 1,
        })
    );
}

#[mora::test]
async fn test_overflow_propagates_through_concurrent_composition() {
    let ops = Operations::new(Delay::none());

    let result = concurrent(&ops, 0, i64::MAX).await;

    assert!(matches!(
        result,
        Err(Error::Overflow {
            operation: "double",
            ..
        })
    ));
}

#[mora::test]
async fn test_overflow_skips_the_continuation() {
    let ops = Operations::new(Delay::none());

    assert!(matches!(
        chained(&ops, i64::MAX).await,
        Err(Error::Overflow {
            operation: "increment",
            ..
        })
    ));
    assert!(matches!(
        chained(&ops, i64::MAX / 2).await,
        Err(Error::Overflow {
            operation: "double",
            ..
        })
    ));
}

#[mora::test]
async fn test_overflow_propagates_through_timer() {
    let ops = Operations::new(Delay::none());

    let result = timed(sequential_independent(&ops, i64::MAX, 1)).await;

    assert!(result.is_err());
}

#[mora::test]
async fn test_repeated_calls_are_idempotent() {
    let ops = Operations::new(Delay::random(Duration::from_millis(10)));

    let first = sequential_dependent(&ops, 4).await;
    let second = sequential_dependent(&ops, 4).await;

    assert_eq!(first, second);
}
