//! 节点提供者挂载表
//!
//! 按路径前缀把规范路径分派给节点提供者：
//!
//! - 前缀 `/` 认领所有路径；其他前缀要求路径与前缀相等，或在前缀之后紧跟 `/`
//!   （`/rom` 不认领 `/romfs`）
//! - 多个前缀同时匹配时取最长的
//! - 同一前缀可以重复挂载，新挂载覆盖旧挂载；卸载后旧挂载重新可见
//!
//! 挂载表本身不加锁，由 [`crate::Vfs`] 放在全局门控之内访问。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::config::ROOT;
use crate::path::strip_trailing_separator;
use crate::{FsError, VfsNode, canonicalize};

/// 挂载记录
struct MountEntry {
    prefix: String,
    node: Arc<dyn VfsNode>,
}

/// 节点提供者挂载表
#[derive(Default)]
pub struct NodeTable {
    /// 按挂载顺序排列，最新的在最后
    mounts: Vec<MountEntry>,
}

impl NodeTable {
    /// 创建空挂载表
    pub const fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// 把 `node` 挂载到 `prefix`
    ///
    /// 前缀先按根目录规范化并去掉结尾的 `/`，因此 `"rom/"`、`"/rom"` 与 `"//rom"` 等价。
    pub fn mount(&mut self, prefix: &str, node: Arc<dyn VfsNode>) -> Result<(), FsError> {
        let prefix = normalize_prefix(prefix)?;
        debug!("vfs: mount {} at {}", node.fs_type(), prefix);
        self.mounts.push(MountEntry { prefix, node });
        Ok(())
    }

    /// 卸载 `prefix` 上最新的挂载，返回被卸载的节点提供者
    pub fn unmount(&mut self, prefix: &str) -> Result<Arc<dyn VfsNode>, FsError> {
        let prefix = normalize_prefix(prefix)?;
        let pos = self
            .mounts
            .iter()
            .rposition(|entry| entry.prefix == prefix)
            .ok_or(FsError::NotFound)?;
        let entry = self.mounts.remove(pos);
        debug!("vfs: unmount {} from {}", entry.node.fs_type(), entry.prefix);
        Ok(entry.node)
    }

    /// 列出所有挂载前缀（按挂载顺序）
    pub fn mounts(&self) -> impl Iterator<Item = &str> + '_ {
        self.mounts.iter().map(|entry| entry.prefix.as_str())
    }

    /// 是否没有任何挂载
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// 查找认领规范路径 `path` 的节点提供者
    ///
    /// 返回提供者以及提供者相对路径在 `path` 中的起始下标，
    /// 调用方用 `&path[offset..]` 取得相对路径，无需复制。
    pub fn resolve(&self, path: &str) -> Option<(&dyn VfsNode, usize)> {
        let mut best: Option<&MountEntry> = None;
        // 从最新的挂载开始，同长度时先找到的（更新的）优先
        for entry in self.mounts.iter().rev() {
            if !claims(&entry.prefix, path) {
                continue;
            }
            if best.is_none_or(|b| entry.prefix.len() > b.prefix.len()) {
                best = Some(entry);
            }
        }

        let entry = best?;
        let offset = suffix_offset(&entry.prefix, path);
        trace!(
            "vfs: {} -> {} ({}) + {:?}",
            path,
            entry.prefix,
            entry.node.fs_type(),
            &path[offset..]
        );
        Some((entry.node.as_ref(), offset))
    }
}

/// 规范化挂载前缀：绝对路径、无 `.`/`..`、无结尾 `/`（根目录除外）
fn normalize_prefix(prefix: &str) -> Result<String, FsError> {
    let mut prefix = canonicalize(None, prefix)?;
    strip_trailing_separator(&mut prefix);
    Ok(prefix)
}

fn claims(prefix: &str, path: &str) -> bool {
    if prefix == ROOT {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// 相对路径的起始下标：跳过前缀以及紧随其后的一个 `/`
fn suffix_offset(prefix: &str, path: &str) -> usize {
    if prefix == ROOT || path.len() == prefix.len() {
        prefix.len()
    } else {
        prefix.len() + 1
    }
}
