//! Mock 实现模块
//!
//! 提供运行时钩子的 Mock 实现，用于测试

pub mod sched;
