//! 门控虚拟文件系统层
//!
//! 此 crate 为嵌入式运行时提供一个全局文件系统命名空间：
//!
//! - [`canonicalize`] - 路径规范化（相对路径按会话当前工作目录解析）
//! - [`NodeTable`] - 按最长挂载前缀把路径分派给节点提供者
//! - [`VfsNode`] / [`NodeFile`] / [`NodeDir`] - 节点提供者接口
//! - [`Vfs`] - 上下文，持有串行化所有操作的全局门控
//! - [`Session`] - 会话及其当前工作目录
//! - [`VfsFile`] / [`VfsDir`] - 已打开的文件与目录句柄
//!
//! 写路径（write / rename / mkdir / rmdir / remove）在这一代实现中不提供，
//! 这些接口总是返回 [`FsError::NotSupported`]。

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;

mod context;
mod handle;
mod node;
mod node_table;
mod path;
mod session;

// Re-export error
pub use error::FsError;

// Re-export path
pub use path::{Segment, Segments, canonicalize, segments};

// Re-export node
pub use node::{DirEntry, FileMode, NodeDir, NodeFile, NodeType, VfsNode, VfsStat};

// Re-export node_table
pub use node_table::NodeTable;

// Re-export context
pub use context::{Vfs, global_vfs, vfs_init, vfs_init_with};

// Re-export session
pub use session::Session;

// Re-export handle
pub use handle::{VfsDir, VfsFile};
