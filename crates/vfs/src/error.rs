//! VFS 错误类型
//!
//! 核心自身只会产生三种错误：[`FsError::OutOfMemory`]（路径缓冲区分配失败）、
//! [`FsError::NotFound`]（没有节点提供者认领该路径）和 [`FsError::NotSupported`]
//! （写路径操作）。其余变体由节点提供者产生，核心原样转发，不做解释也不重试。
//!
//! 可通过 [`FsError::to_errno()`] 转换为负的状态码。

use core::fmt;

use uapi::errno;

/// VFS 错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    // 核心产生的错误
    /// 路径缓冲区分配失败 (-ENOMEM)
    OutOfMemory,
    /// 没有节点提供者认领该路径，或节点不存在 (-ENOENT)
    NotFound,
    /// 操作未实现 (-ENOSYS)
    NotSupported,

    // 节点提供者转发的错误
    /// I/O 错误 (-EIO)
    IoError,
    /// 不是目录 (-ENOTDIR)
    NotDirectory,
    /// 是目录 (-EISDIR)
    IsDirectory,
    /// 权限被拒绝 (-EACCES)
    PermissionDenied,
    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 只读文件系统 (-EROFS)
    ReadOnlyFs,
    /// 无效的句柄 (-EBADF)
    BadFileDescriptor,
    /// 节点提供者自定义的 errno（正数）
    Provider(i32),
}

impl FsError {
    /// 转换为状态码（负数）
    pub fn to_errno(&self) -> isize {
        let code = match self {
            FsError::OutOfMemory => errno::ENOMEM,
            FsError::NotFound => errno::ENOENT,
            FsError::NotSupported => errno::ENOSYS,
            FsError::IoError => errno::EIO,
            FsError::NotDirectory => errno::ENOTDIR,
            FsError::IsDirectory => errno::EISDIR,
            FsError::PermissionDenied => errno::EACCES,
            FsError::InvalidArgument => errno::EINVAL,
            FsError::ReadOnlyFs => errno::EROFS,
            FsError::BadFileDescriptor => errno::EBADF,
            // 提供者可能按 C 习惯传入负值
            FsError::Provider(code) => return -(code.unsigned_abs() as isize),
        };
        -(code as isize)
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::OutOfMemory => f.write_str("out of memory"),
            FsError::NotFound => f.write_str("no such file or directory"),
            FsError::NotSupported => f.write_str("operation not supported"),
            FsError::IoError => f.write_str("i/o error"),
            FsError::NotDirectory => f.write_str("not a directory"),
            FsError::IsDirectory => f.write_str("is a directory"),
            FsError::PermissionDenied => f.write_str("permission denied"),
            FsError::InvalidArgument => f.write_str("invalid argument"),
            FsError::ReadOnlyFs => f.write_str("read-only filesystem"),
            FsError::BadFileDescriptor => f.write_str("bad handle"),
            FsError::Provider(code) => write!(f, "provider error {}", code),
        }
    }
}
