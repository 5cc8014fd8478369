//! Integration tests for the semaphore primitives (host `cargo test`).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;

use lock_api::RawMutex;
use sync::{RawSemaphore, SchedOps, SemMutex, Semaphore};
use test_support::mock::sched::MOCK_SCHED_OPS;

struct CountingSched;

impl SchedOps for CountingSched {
    fn yield_now(&self) {
        MOCK_SCHED_OPS.yield_now();
        thread::yield_now();
    }
}

static COUNTING_SCHED: CountingSched = CountingSched;
static INIT: Once = Once::new();

fn init_once() {
    INIT.call_once(|| unsafe {
        sync::register_sched_ops(&COUNTING_SCHED);
    });
}

#[test]
fn test_try_wait_consumes_permits() {
    let sem = Semaphore::new(2);
    assert!(sem.try_wait());
    assert!(sem.try_wait());
    assert!(!sem.try_wait());
    assert_eq!(sem.available(), 0);

    sem.signal();
    assert_eq!(sem.available(), 1);
    assert!(sem.try_wait());
}

#[test]
fn test_zero_permits_never_acquired() {
    let sem = Semaphore::new(0);
    assert!(!sem.try_wait());
    assert_eq!(sem.available(), 0);
}

#[test]
fn test_guard_returns_permit() {
    let sem = Semaphore::new(1);
    {
        let _permit = sem.acquire();
        assert_eq!(sem.available(), 0);
        assert!(!sem.try_wait());
    }
    assert_eq!(sem.available(), 1);
}

#[test]
fn test_raw_semaphore_is_binary() {
    let raw = RawSemaphore::INIT;
    assert!(!raw.is_locked());
    assert!(raw.try_lock());
    assert!(raw.is_locked());
    assert!(!raw.try_lock());
    unsafe { raw.unlock() };
    assert!(!raw.is_locked());
}

#[test]
fn test_sem_mutex_try_lock_while_held() {
    let m = SemMutex::new(5u32);
    let guard = m.lock();
    assert!(m.try_lock().is_none());
    drop(guard);
    *m.lock() += 1;
    assert_eq!(*m.lock(), 6);
}

#[test]
fn test_contended_wait_goes_through_sched_hook() {
    init_once();

    let sem = Arc::new(Semaphore::new(1));
    let started = Arc::new(AtomicBool::new(false));

    let permit = sem.acquire();
    let before = MOCK_SCHED_OPS.yield_count();

    let waiter = {
        let sem = sem.clone();
        let started = started.clone();
        thread::spawn(move || {
            started.store(true, Ordering::SeqCst);
            sem.wait();
            sem.signal();
        })
    };

    while !started.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    // 等待者已经开始自旋，至少让出过一次之后再释放
    while MOCK_SCHED_OPS.yield_count() == before {
        thread::yield_now();
    }
    drop(permit);

    waiter.join().unwrap();
    assert_eq!(sem.available(), 1);
}

#[test]
fn test_mutual_exclusion_under_contention() {
    init_once();

    const THREADS: usize = 4;
    const ROUNDS: usize = 500;

    let counter = Arc::new(SemMutex::new(0usize));
    let inside = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = counter.clone();
            let inside = inside.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let mut guard = counter.lock();
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                    *guard += 1;
                    inside.fetch_sub(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(*counter.lock(), THREADS * ROUNDS);
}
