//! 单许可信号量与 `lock_api` 的对接
//!
//! [`RawSemaphore`] 是许可数为 1 的 [`Semaphore`]，实现了 [`lock_api::RawMutex`]，
//! 因此可以直接包装成携带数据的互斥量 [`SemMutex`]。

use crate::Semaphore;

/// 单许可信号量，作为 `lock_api` 的底层锁
///
/// 不可重入：持有者再次加锁会永久等待。
#[derive(Debug)]
pub struct RawSemaphore {
    sem: Semaphore,
}

// SAFETY: 许可数初始为 1，wait 成功后其他调用者只能等待，直到 unlock 归还许可，
// 因此同一时刻最多只有一个持有者。
unsafe impl lock_api::RawMutex for RawSemaphore {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSemaphore {
        sem: Semaphore::new(1),
    };

    type GuardMarker = lock_api::GuardSend;

    fn lock(&self) {
        self.sem.wait();
    }

    fn try_lock(&self) -> bool {
        self.sem.try_wait()
    }

    unsafe fn unlock(&self) {
        self.sem.signal();
    }

    fn is_locked(&self) -> bool {
        self.sem.available() == 0
    }
}

/// 以单许可信号量保护数据的互斥量
pub type SemMutex<T> = lock_api::Mutex<RawSemaphore, T>;

/// [`SemMutex`] 的 RAII 保护器
pub type SemMutexGuard<'a, T> = lock_api::MutexGuard<'a, RawSemaphore, T>;
