//! Integration tests for deferred work on the event loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use snap_blocks_core::{CoreError, EventLoop, ManualClock, Signal, TimerError};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn drain(event_loop: &mut EventLoop<&'static str>) -> Vec<&'static str> {
    std::iter::from_fn(|| event_loop.pop_due()).collect()
}

#[test]
fn equal_deadlines_fire_in_scheduling_order() {
    init_tracing();
    let clock = ManualClock::new();
    let mut event_loop = EventLoop::with_clock(clock.clone());

    event_loop.schedule(ms(5), "late");
    event_loop.schedule(ms(1), "first");
    event_loop.schedule(ms(1), "second");
    event_loop.schedule(ms(1), "third");

    clock.advance(ms(1));
    assert_eq!(drain(&mut event_loop), vec!["first", "second", "third"]);
    assert_eq!(event_loop.pending_count(), 1);

    clock.advance(ms(4));
    assert_eq!(drain(&mut event_loop), vec!["late"]);
}

#[test]
fn tasks_scheduled_while_dispatching_start_from_the_deadline() {
    init_tracing();
    let clock = ManualClock::new();
    let mut event_loop = EventLoop::with_clock(clock.clone());
    event_loop.schedule(ms(10), "outer");

    clock.advance(ms(50));
    assert_eq!(event_loop.pop_due(), Some("outer"));
    assert_eq!(event_loop.now(), ms(10));

    event_loop.schedule(ms(5), "inner");
    assert_eq!(event_loop.pop_due(), Some("inner"));
    assert_eq!(event_loop.pop_due(), None);
    assert_eq!(event_loop.now(), ms(50));
}

#[test]
fn nothing_fires_before_its_deadline() {
    let clock = ManualClock::new();
    let mut event_loop = EventLoop::with_clock(clock.clone());
    event_loop.schedule(ms(300), "hide");

    clock.advance(ms(299));
    assert_eq!(event_loop.pop_due(), None);
    assert_eq!(event_loop.time_until_next(), Some(ms(1)));

    clock.advance(ms(1));
    assert_eq!(event_loop.pop_due(), Some("hide"));
    assert_eq!(event_loop.time_until_next(), None);
}

#[test]
fn cancelled_tasks_never_fire() {
    let clock = ManualClock::new();
    let mut event_loop = EventLoop::with_clock(clock.clone());
    let hide = event_loop.schedule(ms(20), "hide");
    event_loop.schedule(ms(30), "keep");

    assert!(event_loop.is_pending(hide));
    assert_eq!(event_loop.cancel(hide).unwrap(), "hide");
    assert!(!event_loop.is_pending(hide));
    assert!(matches!(
        event_loop.cancel(hide),
        Err(CoreError::Timer(TimerError::InvalidTimerId))
    ));

    clock.advance(ms(100));
    assert_eq!(drain(&mut event_loop), vec!["keep"]);
}

#[test]
fn blocked_signal_skips_slots() {
    let signal = Signal::<u32>::new();
    let total = Arc::new(AtomicUsize::new(0));
    let sink = total.clone();
    let id = signal.connect(move |value: &u32| {
        sink.fetch_add(*value as usize, Ordering::SeqCst);
    });

    signal.emit(2);
    signal.set_blocked(true);
    signal.emit(40);
    signal.set_blocked(false);
    signal.emit(3);
    assert_eq!(total.load(Ordering::SeqCst), 5);

    assert!(signal.disconnect(id));
    signal.emit(100);
    assert_eq!(total.load(Ordering::SeqCst), 5);
    assert_eq!(signal.connection_count(), 0);
}
