//! 计数信号量
//!
//! 基于原子 CAS 实现，不依赖中断控制。拿不到许可的任务通过已注册的调度钩子
//! 让出 CPU 后重试，适用于协作式调度的运行时。

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::relax;

/// 计数信号量
///
/// # 示例
/// ```
/// use sync::Semaphore;
///
/// let sem = Semaphore::new(1);
/// {
///     let _permit = sem.acquire(); // 占用唯一的许可
///     assert!(!sem.try_wait());
/// } // 离开作用域，许可自动归还
/// assert_eq!(sem.available(), 1);
/// ```
#[derive(Debug)]
pub struct Semaphore {
    permits: AtomicUsize,
}

impl Semaphore {
    /// 创建一个拥有 `permits` 个许可的信号量
    pub const fn new(permits: usize) -> Self {
        Self {
            permits: AtomicUsize::new(permits),
        }
    }

    /// 获取一个许可，没有可用许可时阻塞（让出 CPU 后重试）
    pub fn wait(&self) {
        while !self.try_wait() {
            relax();
        }
    }

    /// 尝试获取一个许可，成功返回 `true`，不阻塞
    pub fn try_wait(&self) -> bool {
        let mut current = self.permits.load(Ordering::Relaxed);
        while current > 0 {
            match self.permits.compare_exchange_weak(
                current,
                current - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
        false
    }

    /// 归还一个许可
    pub fn signal(&self) {
        self.permits.fetch_add(1, Ordering::Release);
    }

    /// 当前可用许可数 (仅用于调试/测试)
    pub fn available(&self) -> usize {
        self.permits.load(Ordering::Relaxed)
    }

    /// 获取一个许可，并返回在离开作用域时归还许可的 RAII 保护器
    pub fn acquire(&self) -> SemaphoreGuard<'_> {
        self.wait();
        SemaphoreGuard { sem: self }
    }
}

/// 自动归还许可的 RAII 结构体
pub struct SemaphoreGuard<'a> {
    sem: &'a Semaphore,
}

impl Drop for SemaphoreGuard<'_> {
    fn drop(&mut self) {
        self.sem.signal();
    }
}
