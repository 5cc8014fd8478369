//! VFS 上下文
//!
//! [`Vfs`] 持有全局门控：一个单许可信号量，它同时保护节点提供者挂载表。
//! 每个公共操作从进入到返回都持有门控，因此同一个 [`Vfs`] 上的所有操作
//! （包括会话当前工作目录的修改与句柄上的读取、关闭）严格串行。
//!
//! 运行时通常只使用一个进程级实例（[`vfs_init`] / [`global_vfs`]）；
//! 测试可以创建互不干扰的独立实例。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use lazy_static::lazy_static;
use log::debug;
use sync::{SemMutex, SemMutexGuard};

use crate::{FsError, NodeTable, Session, VfsNode};

/// 被门控保护的共享状态
pub(crate) struct VfsInner {
    pub(crate) gate: SemMutex<NodeTable>,
}

/// 持有门控的 RAII 保护器，通过它访问挂载表
pub(crate) type Gate<'a> = SemMutexGuard<'a, NodeTable>;

/// VFS 上下文
///
/// 克隆得到的 [`Vfs`] 共享同一个门控与挂载表。
///
/// # 示例
/// ```
/// use vfs::{FsError, Vfs};
///
/// let vfs = Vfs::new();
/// let session = vfs.open_fs();
/// session.change_dir("/usr/lib").unwrap();
/// assert_eq!(session.current_dir().unwrap(), "/usr/lib");
/// // 没有任何节点提供者认领该路径
/// assert_eq!(session.stat("../bin/ls").unwrap_err(), FsError::NotFound);
/// session.close();
/// ```
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

impl Vfs {
    /// 创建一个没有任何挂载的 VFS 上下文
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                gate: SemMutex::new(NodeTable::new()),
            }),
        }
    }

    /// 创建 VFS 上下文，并在门控之内注册初始的节点提供者
    pub fn with_nodes<I, P>(nodes: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = (P, Arc<dyn VfsNode>)>,
        P: AsRef<str>,
    {
        let vfs = Self::new();
        vfs.register(nodes)?;
        Ok(vfs)
    }

    /// 一次持有门控，依次挂载 `nodes`
    fn register<I, P>(&self, nodes: I) -> Result<(), FsError>
    where
        I: IntoIterator<Item = (P, Arc<dyn VfsNode>)>,
        P: AsRef<str>,
    {
        let mut table = self.inner.gate.lock();
        for (prefix, node) in nodes {
            table.mount(prefix.as_ref(), node)?;
        }
        Ok(())
    }

    /// 把节点提供者挂载到 `prefix`
    pub fn mount(&self, prefix: &str, node: Arc<dyn VfsNode>) -> Result<(), FsError> {
        self.inner.gate.lock().mount(prefix, node)
    }

    /// 卸载 `prefix` 上最新的挂载
    pub fn unmount(&self, prefix: &str) -> Result<Arc<dyn VfsNode>, FsError> {
        self.inner.gate.lock().unmount(prefix)
    }

    /// 当前所有挂载前缀（按挂载顺序）
    pub fn mounts(&self) -> Vec<String> {
        self.inner.gate.lock().mounts().map(String::from).collect()
    }

    /// 打开一个新会话，当前工作目录为根目录
    pub fn open_fs(&self) -> Session {
        Session::new(self.inner.clone())
    }

    /// 门控当前是否被占用 (仅用于调试/测试)
    pub fn is_busy(&self) -> bool {
        self.inner.gate.is_locked()
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// 进程级 VFS 实例
    static ref GLOBAL_VFS: Vfs = Vfs::new();
}

/// 初始化进程级 VFS 实例（创建门控与空挂载表）
///
/// 可重复调用，只有第一次会真正创建。
pub fn vfs_init() -> &'static Vfs {
    lazy_static::initialize(&GLOBAL_VFS);
    debug!("vfs: global instance ready");
    &GLOBAL_VFS
}

/// 初始化进程级 VFS 实例，并在门控之内注册初始的节点提供者
///
/// 所有节点在同一次门控持有期间挂载，其他任务看不到只挂载了一部分的状态。
/// 中途失败时已挂载的节点保留。
pub fn vfs_init_with<I, P>(nodes: I) -> Result<&'static Vfs, FsError>
where
    I: IntoIterator<Item = (P, Arc<dyn VfsNode>)>,
    P: AsRef<str>,
{
    let vfs = vfs_init();
    vfs.register(nodes)?;
    debug!("vfs: initial nodes registered");
    Ok(vfs)
}

/// 获取进程级 VFS 实例
#[inline]
pub fn global_vfs() -> &'static Vfs {
    &GLOBAL_VFS
}
