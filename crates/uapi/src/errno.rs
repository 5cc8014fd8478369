//! errno 常量（与 Linux 数值保持一致）
//!
//! VFS 返回的状态码为这些常量的相反数，例如找不到节点时返回 `-ENOENT`。

/// 没有那个文件或目录
pub const ENOENT: i32 = 2;
/// I/O 错误
pub const EIO: i32 = 5;
/// 错误的文件描述符
pub const EBADF: i32 = 9;
/// 内存不足
pub const ENOMEM: i32 = 12;
/// 权限不够
pub const EACCES: i32 = 13;
/// 不是目录
pub const ENOTDIR: i32 = 20;
/// 是目录
pub const EISDIR: i32 = 21;
/// 无效参数
pub const EINVAL: i32 = 22;
/// 只读文件系统
pub const EROFS: i32 = 30;
/// 功能未实现
pub const ENOSYS: i32 = 38;
