//! VFS 会话
//!
//! 会话持有自己的当前工作目录，所有带路径参数的操作都相对于它解析。
//! 会话没有独立的锁：当前工作目录只在持有全局门控时读写，
//! 因此多个任务共享同一个会话也是安全的，它们观察到的当前工作目录
//! 要么是修改前的值，要么是修改后的值。

use alloc::string::String;
use alloc::sync::Arc;
use core::cell::UnsafeCell;

use log::debug;

use crate::config::{ROOT, WRITE_MODE_FLAG};
use crate::context::{Gate, VfsInner};
use crate::path::strip_trailing_separator;
use crate::{FsError, VfsDir, VfsFile, VfsNode, VfsStat, canonicalize};

/// VFS 会话
///
/// 由 [`crate::Vfs::open_fs`] 创建，用 [`Session::close`] 关闭。
pub struct Session {
    ctx: Arc<VfsInner>,
    /// 当前工作目录，`None` 表示根目录；只在持有 `ctx.gate` 时访问
    cwd: UnsafeCell<Option<String>>,
}

// SAFETY: cwd 的所有读写都要求传入 ctx.gate 的保护器（见 cwd / replace_cwd），
// 门控保证同一时刻只有一个持有者。
unsafe impl Sync for Session {}

impl Session {
    pub(crate) fn new(ctx: Arc<VfsInner>) -> Self {
        Self {
            ctx,
            cwd: UnsafeCell::new(None),
        }
    }

    /// 保护器是否来自本会话所属上下文的门控
    fn is_own_gate(&self, gate: &Gate<'_>) -> bool {
        core::ptr::eq(lock_api::MutexGuard::mutex(gate), &self.ctx.gate)
    }

    fn cwd<'g>(&'g self, gate: &'g Gate<'_>) -> Option<&'g str> {
        debug_assert!(self.is_own_gate(gate));
        // SAFETY: 调用方持有本上下文的门控；返回的引用与保护器的借用同生命周期，
        // 期间无法取得 replace_cwd 所需的 &mut 保护器。
        unsafe { (*self.cwd.get()).as_deref() }
    }

    fn replace_cwd(&self, gate: &mut Gate<'_>, cwd: Option<String>) -> Option<String> {
        debug_assert!(self.is_own_gate(gate));
        // SAFETY: 同上，且 &mut 保护器保证没有其他对 cwd 的借用存活。
        unsafe { core::mem::replace(&mut *self.cwd.get(), cwd) }
    }

    /// 在门控之内把 `path` 解析到节点提供者，并以相对路径调用 `op`
    ///
    /// 没有提供者认领时返回 [`FsError::NotFound`]，不会调用任何提供者。
    fn with_node<T>(
        &self,
        path: &str,
        op: impl FnOnce(&dyn VfsNode, &str) -> Result<T, FsError>,
    ) -> Result<T, FsError> {
        let gate = self.ctx.gate.lock();
        let abs = canonicalize(self.cwd(&gate), path)?;
        match gate.resolve(&abs) {
            Some((node, offset)) => op(node, &abs[offset..]),
            None => Err(FsError::NotFound),
        }
    }

    /// 获取 `path` 的元数据
    pub fn stat(&self, path: &str) -> Result<VfsStat, FsError> {
        self.with_node(path, |node, rel| node.stat(rel))
    }

    /// 以 fopen 风格的 `mode` 打开文件
    ///
    /// `mode` 中含 `w` 时以写模式转交给节点提供者，核心本身不支持写入。
    pub fn open(&self, path: &str, mode: &str) -> Result<VfsFile, FsError> {
        let write_mode = mode.contains(WRITE_MODE_FLAG);
        let file = self.with_node(path, |node, rel| node.open(rel, write_mode))?;
        Ok(VfsFile::new(self.ctx.clone(), file))
    }

    /// 打开目录
    pub fn open_dir(&self, path: &str) -> Result<VfsDir, FsError> {
        let dir = self.with_node(path, |node, rel| node.open_dir(rel))?;
        Ok(VfsDir::new(self.ctx.clone(), dir))
    }

    /// 切换当前工作目录
    ///
    /// 只做路径规范化，不检查目标是否存在或是否为目录；
    /// 不存在的目录会在之后的操作中以 [`FsError::NotFound`] 等错误暴露。
    pub fn change_dir(&self, path: &str) -> Result<(), FsError> {
        let mut gate = self.ctx.gate.lock();
        let mut abs = canonicalize(self.cwd(&gate), path)?;
        strip_trailing_separator(&mut abs);
        debug!("vfs: chdir {:?} -> {}", path, abs);
        let _old = self.replace_cwd(&mut gate, Some(abs));
        Ok(())
    }

    /// 把当前工作目录复制到 `buf`，返回写入的字节数（不含结尾的 0）
    ///
    /// `buf` 不够大时截断，只要 `buf` 非空就保证以 0 结尾；空 `buf` 不写入任何内容。
    pub fn current_dir_into(&self, buf: &mut [u8]) -> usize {
        let gate = self.ctx.gate.lock();
        let cwd = self.cwd(&gate).unwrap_or(ROOT).as_bytes();

        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };
        let len = cwd.len().min(room);
        buf[..len].copy_from_slice(&cwd[..len]);
        buf[len] = 0;
        len
    }

    /// 返回当前工作目录的副本
    pub fn current_dir(&self) -> Result<String, FsError> {
        let gate = self.ctx.gate.lock();
        let cwd = self.cwd(&gate).unwrap_or(ROOT);

        let mut copy = String::new();
        copy.try_reserve_exact(cwd.len())
            .map_err(|_| FsError::OutOfMemory)?;
        copy.push_str(cwd);
        Ok(copy)
    }

    /// 重命名（未实现，总是返回 [`FsError::NotSupported`]）
    pub fn rename(&self, _from: &str, _to: &str) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 创建目录（未实现，总是返回 [`FsError::NotSupported`]）
    pub fn mkdir(&self, _path: &str, _mode: u32) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 删除目录（未实现，总是返回 [`FsError::NotSupported`]）
    pub fn rmdir(&self, _path: &str) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 删除文件（未实现，总是返回 [`FsError::NotSupported`]）
    pub fn remove(&self, _path: &str) -> Result<(), FsError> {
        Err(FsError::NotSupported)
    }

    /// 关闭会话，在门控之内释放当前工作目录
    pub fn close(self) {
        let mut gate = self.ctx.gate.lock();
        let cwd = self.replace_cwd(&mut gate, None);
        drop(cwd);
        drop(gate);
    }
}
