// tests/limiter_pacing.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;

use tokio::time::{Duration, Instant, sleep};

use ratexec::pipeline::{RateLimiter, handoff, spawn_rate_limiter};

type TestResult = Result<(), Box<dyn Error>>;

/// Feed `items` into a limiter at `rate` and record when each one came out.
async fn paced_arrivals(
    rate: u32,
    items: Vec<u32>,
    producer_gap: Option<Duration>,
    consumer_gap: Option<Duration>,
) -> (Vec<(u32, Instant)>, u64) {
    let (tx, rx) = handoff::<u32>();
    let (out, limiter) = spawn_rate_limiter(RateLimiter::per_second(rate), rx);

    tokio::spawn(async move {
        for item in items {
            if let Some(gap) = producer_gap {
                sleep(gap).await;
            }
            if tx.send(item).await.is_err() {
                break;
            }
        }
    });

    let mut seen = Vec::new();
    while let Some(item) = out.recv().await {
        seen.push((item, Instant::now()));
        if let Some(gap) = consumer_gap {
            sleep(gap).await;
        }
    }

    let admitted = limiter.await.expect("limiter task panicked");
    (seen, admitted)
}

fn gaps(seen: &[(u32, Instant)]) -> Vec<Duration> {
    seen.windows(2).map(|w| w[1].1 - w[0].1).collect()
}

#[tokio::test(start_paused = true)]
async fn first_item_is_admitted_without_delay() -> TestResult {
    init_tracing();

    let start = Instant::now();
    let (seen, _) = paced_arrivals(1, vec![7], None, None).await;

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, 7);
    assert!(
        seen[0].1 - start < Duration::from_millis(1),
        "first admission should be immediate, took {:?}",
        seen[0].1 - start
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn consecutive_admissions_are_at_least_one_period_apart() -> TestResult {
    init_tracing();

    let (seen, admitted) = paced_arrivals(10, (0..6).collect(), None, None).await;

    assert_eq!(admitted, 6);
    for gap in gaps(&seen) {
        assert!(gap >= Duration::from_millis(100), "gap {gap:?} shorter than 100ms");
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn preserves_order_and_closes_with_input() -> TestResult {
    init_tracing();

    let items: Vec<u32> = (0..25).collect();
    let (seen, admitted) = paced_arrivals(1000, items.clone(), None, None).await;

    let order: Vec<u32> = seen.iter().map(|(i, _)| *i).collect();
    assert_eq!(order, items);
    assert_eq!(admitted, 25);
    Ok(())
}

/// A stalled consumer must not let the limiter build up credit and then
/// release a burst.
#[tokio::test(start_paused = true)]
async fn slow_consumer_never_causes_a_burst() -> TestResult {
    init_tracing();

    let (seen, _) = paced_arrivals(
        10,
        (0..5).collect(),
        None,
        Some(Duration::from_millis(350)),
    )
    .await;

    for gap in gaps(&seen) {
        assert!(
            gap >= Duration::from_millis(350),
            "gap {gap:?} shorter than the consumer stall"
        );
    }
    Ok(())
}

/// When upstream is slower than the rate, items go out as soon as they
/// arrive instead of waiting another full period.
#[tokio::test(start_paused = true)]
async fn slow_producer_is_not_delayed_further() -> TestResult {
    init_tracing();

    let (seen, _) = paced_arrivals(
        10,
        (0..4).collect(),
        Some(Duration::from_millis(300)),
        None,
    )
    .await;

    for gap in gaps(&seen) {
        assert!(gap >= Duration::from_millis(300));
        assert!(
            gap < Duration::from_millis(400),
            "gap {gap:?} includes an extra period"
        );
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_input_closes_output_immediately() -> TestResult {
    init_tracing();

    let (seen, admitted) = paced_arrivals(5, Vec::new(), None, None).await;

    assert!(seen.is_empty());
    assert_eq!(admitted, 0);
    Ok(())
}

#[test]
fn period_is_one_second_divided_by_rate() {
    assert_eq!(RateLimiter::per_second(1).period(), Duration::from_secs(1));
    assert_eq!(RateLimiter::per_second(4).period(), Duration::from_millis(250));
    assert_eq!(
        RateLimiter::per_second(3).period(),
        Duration::from_nanos(333_333_333)
    );
}
