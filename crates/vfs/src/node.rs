//! 节点提供者接口
//!
//! 节点提供者（例如 ROM 镜像、块设备上的文件系统、设备节点表）挂载在某个路径前缀下，
//! 负责该前缀以下的全部路径。核心只通过这里的 trait 与它们交互：
//!
//! - [`VfsNode`] - 按提供者相对路径执行 stat / open / opendir
//! - [`NodeFile`] - 已打开文件的读取、EOF 查询与关闭
//! - [`NodeDir`] - 已打开目录的逐项读取与关闭
//!
//! 传给提供者的路径是去掉挂载前缀（以及紧随其后的 `/`）之后的部分，
//! 挂载点自身对应空字符串。提供者返回的结果由核心原样转发。

use alloc::boxed::Box;
use alloc::string::String;

use crate::FsError;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 字符设备
    CharDevice,
    /// 块设备
    BlockDevice,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// 文件类型与权限位（与 POSIX 兼容）
    pub struct FileMode: u32 {
        /// 文件类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;
        /// 字符设备
        const S_IFCHR  = 0o020000;
        /// 块设备
        const S_IFBLK  = 0o060000;

        /// 用户读
        const S_IRUSR  = 0o400;
        /// 用户写
        const S_IWUSR  = 0o200;
        /// 用户执行
        const S_IXUSR  = 0o100;
    }
}

impl FileMode {
    /// 从模式位中取出节点类型
    pub fn node_type(&self) -> Option<NodeType> {
        match self.bits() & FileMode::S_IFMT.bits() {
            bits if bits == FileMode::S_IFREG.bits() => Some(NodeType::File),
            bits if bits == FileMode::S_IFDIR.bits() => Some(NodeType::Directory),
            bits if bits == FileMode::S_IFCHR.bits() => Some(NodeType::CharDevice),
            bits if bits == FileMode::S_IFBLK.bits() => Some(NodeType::BlockDevice),
            _ => None,
        }
    }
}

/// stat 返回的元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfsStat {
    /// 类型与权限位
    pub mode: FileMode,
    /// 大小（字节）
    pub size: u64,
    /// 最后修改时间（秒，提供者不支持时为 0）
    pub mtime: u64,
}

impl VfsStat {
    /// 是否为目录
    pub fn is_dir(&self) -> bool {
        self.mode.node_type() == Some(NodeType::Directory)
    }

    /// 是否为普通文件
    pub fn is_file(&self) -> bool {
        self.mode.node_type() == Some(NodeType::File)
    }
}

/// 目录项（readdir 返回）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// 名字（不含路径）
    pub name: String,
    /// 节点类型
    pub node_type: NodeType,
    /// 大小（字节）
    pub size: u64,
}

/// 节点提供者
///
/// 所有方法都在全局门控之内被调用，实现不需要自行加锁防御 VFS 层的并发，
/// 也不能回调任何 VFS 公共接口（门控不可重入）。
pub trait VfsNode: Send + Sync {
    /// 提供者类型名称（用于日志）
    fn fs_type(&self) -> &'static str;

    /// 获取 `path` 的元数据
    fn stat(&self, path: &str) -> Result<VfsStat, FsError>;

    /// 打开文件
    ///
    /// `write_mode` 来自调用方的模式串，核心不做额外处理；是否支持写入由提供者决定。
    fn open(&self, path: &str, write_mode: bool) -> Result<Box<dyn NodeFile>, FsError>;

    /// 打开目录
    fn open_dir(&self, path: &str) -> Result<Box<dyn NodeDir>, FsError>;
}

/// 提供者返回的已打开文件
pub trait NodeFile: Send {
    /// 读取最多 `nmemb` 个大小为 `size` 的元素到 `buf`，返回读到的元素个数
    ///
    /// 核心保证 `size * nmemb <= buf.len()`。
    fn read(&mut self, buf: &mut [u8], size: usize, nmemb: usize) -> Result<usize, FsError>;

    /// 是否已到文件末尾
    fn eof(&self) -> bool;

    /// 关闭文件（可选方法）
    fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}

/// 提供者返回的已打开目录
pub trait NodeDir: Send {
    /// 读取下一个目录项，没有更多目录项时返回 `None`
    fn read_dir(&mut self) -> Option<DirEntry>;

    /// 关闭目录（可选方法）
    fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}
