//! Lock fixtures - uncontended acquire/release of std and parking_lot locks
//!
//! Only the non-contended fast path is measured: one thread, lock always free.

use core::cell::Cell;
use core::hint::black_box;
use std::sync::PoisonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockFlavor {
    StdMutex,
    ParkingLotMutex,
    /// `parking_lot::ReentrantMutex`, may be re-locked by its owner
    ReentrantMutex,
    StdRwLockRead,
    StdRwLockWrite,
    ParkingLotRwLockRead,
    /// Shared lock that may be taken while the thread already reads
    ParkingLotRwLockReadRecursive,
    ParkingLotRwLockWrite,
}

impl LockFlavor {
    pub const ALL: [LockFlavor; 8] = [
        Self::StdMutex,
        Self::ParkingLotMutex,
        Self::ReentrantMutex,
        Self::StdRwLockRead,
        Self::StdRwLockWrite,
        Self::ParkingLotRwLockRead,
        Self::ParkingLotRwLockReadRecursive,
        Self::ParkingLotRwLockWrite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::StdMutex => "std_mutex",
            Self::ParkingLotMutex => "parking_lot_mutex",
            Self::ReentrantMutex => "parking_lot_reentrant_mutex",
            Self::StdRwLockRead => "std_rwlock_read",
            Self::StdRwLockWrite => "std_rwlock_write",
            Self::ParkingLotRwLockRead => "parking_lot_rwlock_read",
            Self::ParkingLotRwLockReadRecursive => "parking_lot_rwlock_read_recursive",
            Self::ParkingLotRwLockWrite => "parking_lot_rwlock_write",
        }
    }
}

/// One instance of every lock kind
#[derive(Debug, Default)]
pub struct LockSet {
    std_mutex: std::sync::Mutex<u64>,
    pl_mutex: parking_lot::Mutex<u64>,
    reentrant: parking_lot::ReentrantMutex<Cell<u64>>,
    std_rwlock: std::sync::RwLock<u64>,
    pl_rwlock: parking_lot::RwLock<u64>,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire and immediately release the lock for `flavor`.
    ///
    /// A poisoned std lock is still acquired; the suite never panics while
    /// holding one, so poisoning carries no meaning here.
    #[inline]
    pub fn cycle(&self, flavor: LockFlavor) {
        match flavor {
            LockFlavor::StdMutex => {
                let guard = self.std_mutex.lock().unwrap_or_else(PoisonError::into_inner);
                black_box(&guard);
            }
            LockFlavor::ParkingLotMutex => {
                black_box(&self.pl_mutex.lock());
            }
            LockFlavor::ReentrantMutex => {
                black_box(&self.reentrant.lock());
            }
            LockFlavor::StdRwLockRead => {
                let guard = self.std_rwlock.read().unwrap_or_else(PoisonError::into_inner);
                black_box(&guard);
            }
            LockFlavor::StdRwLockWrite => {
                let guard = self.std_rwlock.write().unwrap_or_else(PoisonError::into_inner);
                black_box(&guard);
            }
            LockFlavor::ParkingLotRwLockRead => {
                black_box(&self.pl_rwlock.read());
            }
            LockFlavor::ParkingLotRwLockReadRecursive => {
                black_box(&self.pl_rwlock.read_recursive());
            }
            LockFlavor::ParkingLotRwLockWrite => {
                black_box(&self.pl_rwlock.write());
            }
        }
    }

    /// Lock the reentrant mutex `depth` times over, bumping its counter once
    /// per level. Returns the counter afterwards.
    pub fn reenter(&self, depth: usize) -> u64 {
        fn step(lock: &parking_lot::ReentrantMutex<Cell<u64>>, depth: usize) {
            if depth == 0 {
                return;
            }
            let guard = lock.lock();
            guard.set(guard.get() + 1);
            step(lock, depth - 1);
        }

        step(&self.reentrant, depth);
        self.reentrant.lock().get()
    }
}
