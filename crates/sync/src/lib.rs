//! 同步原语
//!
//! 向 VFS 层提供基于信号量的互斥原语：
//!
//! - [`Semaphore`] - 计数信号量（等待 / 释放）
//! - [`RawSemaphore`] - 单许可信号量，实现 [`lock_api::RawMutex`]
//! - [`SemMutex`] - 以信号量为底层锁的互斥量
//!
//! # 调度依赖
//!
//! 运行时采用协作式多任务。信号量在拿不到许可时通过 [`SchedOps::yield_now`]
//! 让出 CPU；运行时需要在启动时调用 [`register_sched_ops`] 注册实现。
//! 未注册时退化为 `spin_loop` 忙等。

#![no_std]

mod raw_semaphore;
mod semaphore;

pub use raw_semaphore::{RawSemaphore, SemMutex, SemMutexGuard};
pub use semaphore::{Semaphore, SemaphoreGuard};

use core::sync::atomic::{AtomicPtr, Ordering};

/// 调度相关操作的 trait
///
/// 由运行时实现并注册，用于在等待信号量时让出当前任务。
pub trait SchedOps: Send + Sync {
    /// 让出 CPU，允许其他任务运行
    fn yield_now(&self);
}

/// 存储 SchedOps trait object 的胖指针
struct SchedOpsPtr {
    data: AtomicPtr<()>,
    vtable: AtomicPtr<()>,
}

impl SchedOpsPtr {
    const fn new() -> Self {
        Self {
            data: AtomicPtr::new(core::ptr::null_mut()),
            vtable: AtomicPtr::new(core::ptr::null_mut()),
        }
    }
}

static SCHED_OPS: SchedOpsPtr = SchedOpsPtr::new();

/// 注册调度操作实现
///
/// # Safety
///
/// - 必须在任何任务竞争信号量之前调用
/// - 只能调用一次
pub unsafe fn register_sched_ops(ops: &'static dyn SchedOps) {
    let ptr: *const dyn SchedOps = ops;
    // SAFETY: fat pointer 的布局是 (data, vtable)
    let (data, vtable) = unsafe { core::mem::transmute::<_, (*mut (), *mut ())>(ptr) };
    SCHED_OPS.vtable.store(vtable, Ordering::Release);
    SCHED_OPS.data.store(data, Ordering::Release);
}

/// 获取已注册的调度操作
fn sched_ops() -> Option<&'static dyn SchedOps> {
    let data = SCHED_OPS.data.load(Ordering::Acquire);
    let vtable = SCHED_OPS.vtable.load(Ordering::Acquire);
    if data.is_null() || vtable.is_null() {
        return None;
    }
    // SAFETY: 指针由 register_sched_ops 设置，保证有效
    Some(unsafe { core::mem::transmute::<(*mut (), *mut ()), &'static dyn SchedOps>((data, vtable)) })
}

/// 等待期间的退让：有调度器时让出 CPU，否则忙等一次
#[inline]
pub(crate) fn relax() {
    match sched_ops() {
        Some(ops) => ops.yield_now(),
        None => core::hint::spin_loop(),
    }
}
