use mora::time::sleep;
use mora::{RuntimeBuilder, join, task};
use std::future::Future;
use std::pin::pin;
use std::task::{Context, Waker};
use std::time::{Duration, Instant};

#[mora::test]
async fn test_sleep_basic() {
    let start = Instant::now();
    sleep(Duration::from_millis(50)).await;
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(50),
        "Sleep should wait at least the specified duration"
    );
}

#[mora::test]
async fn test_sleep_zero_duration() {
    let start = Instant::now();
    sleep(Duration::from_millis(0)).await;
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(10),
        "Zero duration sleep should be fast"
    );
}

#[mora::test]
async fn test_sleep_in_function() {
    let start = Instant::now();
    sleep_and_record(start).await;
}

async fn sleep_and_record(start: Instant) {
    let elapsed_before = start.elapsed();
    sleep(Duration::from_millis(30)).await;
    let elapsed_after = start.elapsed();

    assert!(elapsed_after - elapsed_before >= Duration::from_millis(30));
}

#[mora::test]
async fn test_sleep_does_not_block_other_tasks() {
    let start = Instant::now();

    let background = task::spawn(async {
        sleep(Duration::from_millis(80)).await;
        "background"
    });
    sleep(Duration::from_millis(80)).await;

    assert_eq!(background.await, "background");
    assert!(
        start.elapsed() < Duration::from_millis(150),
        "Two overlapping sleeps should not add up, took {:?}",
        start.elapsed()
    );
}

#[mora::test]
async fn test_sleeps_complete_in_deadline_order() {
    let order = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

    let handles: Vec<_> = [60u64, 20, 40]
        .into_iter()
        .map(|ms| {
            let order = order.clone();
            task::spawn(async move {
                sleep(Duration::from_millis(ms)).await;
                order.lock().unwrap().push(ms);
            })
        })
        .collect();

    for handle in handles {
        handle.await;
    }

    assert_eq!(*order.lock().unwrap(), vec![20, 40, 60]);
}

#[test]
fn test_dropped_sleep_does_not_wake() {
    let rt = RuntimeBuilder::new().build();

    let finished = rt.block_on(async {
        let abandoned = sleep(Duration::from_secs(60));
        drop(abandoned);

        sleep(Duration::from_millis(10)).await;
        true
    });

    assert!(finished);
}

#[test]
fn test_sleep_with_huge_duration_stays_pending() {
    let rt = RuntimeBuilder::new().build();

    rt.block_on(async {
        let mut cx = Context::from_waker(Waker::noop());

        let far = sleep(Duration::MAX);
        assert!(far.deadline() > Instant::now() + Duration::from_secs(86400 * 365));
        assert!(!far.is_elapsed());

        let mut joined = pin!(async { join!(sleep(Duration::MAX), async { 7 }) });
        assert!(joined.as_mut().poll(&mut cx).is_pending());
    });
}

#[test]
#[should_panic(expected = "within a mora runtime")]
fn test_sleep_outside_runtime_panics() {
    let mut cx = Context::from_waker(Waker::noop());
    let _ = pin!(sleep(Duration::from_secs(1))).poll(&mut cx);
}
