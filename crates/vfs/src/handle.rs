//! 已打开的文件与目录句柄
//!
//! 句柄只是把节点提供者返回的对象包一层：每次读取、查询与关闭都在全局门控之内
//! 转交给提供者，以便与其他会话的路径操作、切换目录或关闭串行。

use alloc::boxed::Box;
use alloc::sync::Arc;

use log::{debug, warn};

use crate::context::VfsInner;
use crate::{DirEntry, FsError, NodeDir, NodeFile};

/// 已打开的文件
///
/// 用 [`VfsFile::close`] 关闭以取得提供者返回的状态；
/// 直接丢弃时也会在门控之内关闭，但状态只会被记录到日志。
pub struct VfsFile {
    ctx: Arc<VfsInner>,
    /// 关闭后为 `None`
    file: Option<Box<dyn NodeFile>>,
}

impl VfsFile {
    pub(crate) fn new(ctx: Arc<VfsInner>, file: Box<dyn NodeFile>) -> Self {
        Self {
            ctx,
            file: Some(file),
        }
    }

    /// 读取最多 `nmemb` 个大小为 `size` 的元素，返回读到的元素个数
    ///
    /// `nmemb` 会被限制在 `buf` 能容纳的元素个数以内；`size` 为 0 时直接返回 0。
    pub fn read(&mut self, buf: &mut [u8], size: usize, nmemb: usize) -> Result<usize, FsError> {
        if size == 0 {
            return Ok(0);
        }
        let nmemb = nmemb.min(buf.len() / size);

        let _gate = self.ctx.gate.lock();
        let file = self.file.as_mut().ok_or(FsError::BadFileDescriptor)?;
        file.read(buf, size, nmemb)
    }

    /// 写入（未实现，总是返回 [`FsError::NotSupported`]）
    pub fn write(&mut self, _buf: &[u8], _size: usize, _nmemb: usize) -> Result<usize, FsError> {
        Err(FsError::NotSupported)
    }

    /// 是否已到文件末尾
    pub fn eof(&self) -> bool {
        let _gate = self.ctx.gate.lock();
        self.file.as_ref().is_none_or(|file| file.eof())
    }

    /// 关闭文件，返回提供者的关闭状态
    pub fn close(mut self) -> Result<(), FsError> {
        let _gate = self.ctx.gate.lock();
        match self.file.take() {
            Some(mut file) => file.close(),
            None => Ok(()),
        }
    }
}

impl Drop for VfsFile {
    fn drop(&mut self) {
        let Some(mut file) = self.file.take() else {
            return;
        };
        let _gate = self.ctx.gate.lock();
        debug!("vfs: file dropped without close");
        if let Err(e) = file.close() {
            warn!("vfs: implicit close failed: {}", e);
        }
        // 提供者对象的析构也要在门控之内
        drop(file);
    }
}

/// 已打开的目录
///
/// 目录项只能从头到尾读取一次；需要重新遍历时重新打开目录。
/// 同时实现了 [`Iterator`]，每次 `next` 等价于一次 [`VfsDir::read_dir`]。
pub struct VfsDir {
    ctx: Arc<VfsInner>,
    /// 关闭后为 `None`
    dir: Option<Box<dyn NodeDir>>,
}

impl VfsDir {
    pub(crate) fn new(ctx: Arc<VfsInner>, dir: Box<dyn NodeDir>) -> Self {
        Self {
            ctx,
            dir: Some(dir),
        }
    }

    /// 读取下一个目录项，没有更多目录项时返回 `None`
    pub fn read_dir(&mut self) -> Option<DirEntry> {
        let _gate = self.ctx.gate.lock();
        self.dir.as_mut()?.read_dir()
    }

    /// 关闭目录，返回提供者的关闭状态
    pub fn close(mut self) -> Result<(), FsError> {
        let _gate = self.ctx.gate.lock();
        match self.dir.take() {
            Some(mut dir) => dir.close(),
            None => Ok(()),
        }
    }
}

impl Iterator for VfsDir {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        self.read_dir()
    }
}

impl Drop for VfsDir {
    fn drop(&mut self) {
        let Some(mut dir) = self.dir.take() else {
            return;
        };
        let _gate = self.ctx.gate.lock();
        debug!("vfs: directory dropped without close");
        if let Err(e) = dir.close() {
            warn!("vfs: implicit closedir failed: {}", e);
        }
        // 提供者对象的析构也要在门控之内
        drop(dir);
    }
}
