//! 与调用方共用的定义
//!
//! VFS 层所有错误都以负的 errno 返回给调用方，这里集中定义这些常量，
//! 保证核心、节点提供者和上层应用对状态码的理解一致。

#![no_std]

pub mod errno;
