//! Frame pacing gate.
//!
//! A counting gate bounding how many frames may be submitted to the GPU
//! without having completed. The render thread calls [`FrameGate::acquire`]
//! before writing a ring slot; the GPU completion callback calls
//! [`FrameGate::release`] from whatever thread wgpu delivers it on.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Counting gate initialised to the ring depth.
///
/// Cloning is cheap and shares the same counter.
#[derive(Clone)]
pub struct FrameGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    available: Mutex<usize>,
    freed: Condvar,
    capacity: usize,
}

impl FrameGate {
    /// Creates a gate with `capacity` immediately available slots.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            inner: Arc::new(GateInner {
                available: Mutex::new(capacity),
                freed: Condvar::new(),
                capacity,
            }),
        }
    }

    /// Blocks until a slot is free, then takes it.
    ///
    /// Not cancellable; completion of in-flight GPU work is what unblocks it.
    pub fn acquire(&self) {
        let mut available = self.inner.available.lock();
        while *available == 0 {
            self.inner.freed.wait(&mut available);
        }
        *available -= 1;
    }

    /// Takes a slot if one is free, without blocking.
    pub fn try_acquire(&self) -> bool {
        let mut available = self.inner.available.lock();
        if *available == 0 {
            return false;
        }
        *available -= 1;
        true
    }

    /// Returns a slot and wakes one waiter.
    ///
    /// Must be called exactly once per completed frame.
    pub fn release(&self) {
        let mut available = self.inner.available.lock();
        if *available >= self.inner.capacity {
            debug_assert!(false, "FrameGate released more often than acquired");
            log::warn!("frame gate release ignored: already at capacity {}", self.inner.capacity);
            return;
        }
        *available += 1;
        self.inner.freed.notify_one();
    }

    /// Number of slots currently free.
    pub fn available(&self) -> usize {
        *self.inner.available.lock()
    }

    /// Number of frames that may be in flight at once.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Number of frames acquired but not yet released.
    pub fn in_flight(&self) -> usize {
        self.inner.capacity - self.available()
    }
}

impl std::fmt::Debug for FrameGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameGate")
            .field("available", &self.available())
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn capacity_acquires_succeed_immediately() {
        let gate = FrameGate::new(3);
        for _ in 0..3 {
            assert!(gate.try_acquire());
        }
        assert!(!gate.try_acquire());
        assert_eq!(gate.in_flight(), 3);
    }

    #[test]
    fn release_allows_exactly_one_more() {
        let gate = FrameGate::new(3);
        for _ in 0..3 {
            gate.acquire();
        }
        gate.release();
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
    }

    #[test]
    fn acquire_blocks_until_release() {
        let gate = FrameGate::new(3);
        for _ in 0..3 {
            gate.acquire();
        }

        let acquired = Arc::new(AtomicBool::new(false));
        let waiter = {
            let gate = gate.clone();
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                gate.acquire();
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!acquired.load(Ordering::SeqCst), "fourth acquire must block");

        gate.release();
        waiter.join().expect("waiter thread panicked");
        assert!(acquired.load(Ordering::SeqCst));
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn release_from_another_thread() {
        // Completion callbacks arrive off the render thread.
        let gate = FrameGate::new(2);
        gate.acquire();
        gate.acquire();

        let releaser = gate.clone();
        thread::spawn(move || releaser.release())
            .join()
            .expect("releaser thread panicked");

        assert_eq!(gate.available(), 1);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn over_release_is_clamped() {
        let gate = FrameGate::new(2);
        gate.release();
        assert_eq!(gate.available(), 2);
    }
}
