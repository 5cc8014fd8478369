//! 调度相关操作的 Mock 实现
//!
//! 注意：这里不直接依赖 `sync` crate（避免循环依赖）。
//! 测试代码为 [`MockSchedOps`] 包一层并实现 `sync::SchedOps`。

use core::sync::atomic::{AtomicUsize, Ordering};

/// Mock 调度操作
///
/// 不真正切换任务，只记录让出次数，便于断言等待路径确实经过了调度钩子。
pub struct MockSchedOps {
    pub yields: AtomicUsize,
}

impl MockSchedOps {
    pub const fn new() -> Self {
        Self {
            yields: AtomicUsize::new(0),
        }
    }

    pub fn yield_now(&self) {
        self.yields.fetch_add(1, Ordering::SeqCst);
        core::hint::spin_loop();
    }

    pub fn yield_count(&self) -> usize {
        self.yields.load(Ordering::SeqCst)
    }
}

/// 全局 Mock 实例
pub static MOCK_SCHED_OPS: MockSchedOps = MockSchedOps::new();
