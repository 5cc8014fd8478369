//! 路径规范化
//!
//! 把用户给出的路径（绝对或相对于会话当前工作目录）转换为规范绝对路径：
//!
//! - 以 `/` 开头的路径从根目录开始，否则从当前工作目录开始
//! - 连续的 `/` 折叠为一个
//! - `.` 跳过；`..` 弹出上一段，越过根目录时静默忽略
//! - 保留输入中最后一段之后的 `/`
//!
//! 结果缓冲区在开始时一次性预留，预留失败返回 [`FsError::OutOfMemory`]，
//! 不会产生部分结果。

use alloc::string::String;

use crate::FsError;
use crate::config::{ROOT, SEPARATOR};

/// 路径段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 当前目录 "."
    Current,
    /// 父目录 ".."
    Parent,
    /// 普通名字
    Normal {
        /// 段内容（不含 `/`）
        name: &'a str,
        /// 输入中紧跟该段之后是否有 `/`
        trailing_slash: bool,
    },
}

/// 从左到右扫描路径段的迭代器，见 [`segments`]
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// 按段扫描路径，段之间任意数量的 `/` 视为一个分隔符
pub fn segments(path: &str) -> Segments<'_> {
    Segments { rest: path }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = self.rest.trim_start_matches('/');
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        let end = rest.find('/').unwrap_or(rest.len());
        let (name, after) = rest.split_at(end);
        self.rest = after;

        Some(match name {
            "." => Segment::Current,
            ".." => Segment::Parent,
            name => Segment::Normal {
                name,
                trailing_slash: !after.is_empty(),
            },
        })
    }
}

/// 只追加的路径构造器
///
/// 唯一的回退操作是 [`PathBuilder::pop_segment`]，对应 `..`。
struct PathBuilder {
    buf: String,
}

impl PathBuilder {
    /// 以 `base` 为起点，并为 `input` 预留最坏情况下需要的空间
    ///
    /// 最坏情况：输入的每个字节都保留下来，外加一个分隔符和一个结尾。
    fn seeded(base: &str, input: &str) -> Result<Self, FsError> {
        let mut buf = String::new();
        buf.try_reserve_exact(base.len() + input.len() + 2)
            .map_err(|_| FsError::OutOfMemory)?;
        buf.push_str(base);
        Ok(Self { buf })
    }

    fn ends_with_separator(&self) -> bool {
        self.buf.as_bytes().last() == Some(&SEPARATOR)
    }

    fn push_segment(&mut self, name: &str, trailing_slash: bool) {
        if !self.ends_with_separator() {
            self.buf.push('/');
        }
        self.buf.push_str(name);
        if trailing_slash {
            self.buf.push('/');
        }
    }

    /// 截断到上一个 `/`（包含该 `/`）；只剩根目录时不做任何事
    fn pop_segment(&mut self) {
        if self.buf.len() <= ROOT.len() {
            return;
        }
        let body = self.buf.strip_suffix('/').unwrap_or(self.buf.as_str());
        match body.rfind('/') {
            Some(pos) => self.buf.truncate(pos + 1),
            None => {
                self.buf.clear();
                self.buf.push_str(ROOT);
            }
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// 将 `input` 相对于 `cwd` 规范化为绝对路径
///
/// `cwd` 为 `None` 时视为根目录。`cwd` 本身应已是规范路径，
/// 因此空输入原样返回 `cwd`。
///
/// # 示例
/// ```
/// use vfs::canonicalize;
///
/// assert_eq!(canonicalize(None, "x").unwrap(), "/x");
/// assert_eq!(canonicalize(Some("/a/b"), "../../../c").unwrap(), "/c");
/// assert_eq!(canonicalize(Some("/a"), "").unwrap(), "/a");
/// ```
pub fn canonicalize(cwd: Option<&str>, input: &str) -> Result<String, FsError> {
    let base = match cwd {
        Some(cwd) if !input.starts_with('/') => cwd,
        _ => ROOT,
    };

    let mut builder = PathBuilder::seeded(base, input)?;
    for segment in segments(input) {
        match segment {
            Segment::Current => {}
            Segment::Parent => builder.pop_segment(),
            Segment::Normal {
                name,
                trailing_slash,
            } => builder.push_segment(name, trailing_slash),
        }
    }

    Ok(builder.finish())
}

/// 去掉规范路径结尾的 `/`（根目录除外）
pub(crate) fn strip_trailing_separator(path: &mut String) {
    while path.len() > ROOT.len() && path.ends_with('/') {
        path.pop();
    }
}
