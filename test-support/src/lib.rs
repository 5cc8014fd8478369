//! 测试支持 crate
//!
//! 提供运行时钩子的 Mock 实现

#![no_std]

pub mod mock;
