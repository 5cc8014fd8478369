//! 配置常量
//!
//! VFS 层没有运行时配置项，这里集中定义编译期常量。

/// 根目录
pub const ROOT: &str = "/";

/// 路径分隔符
pub const SEPARATOR: u8 = b'/';

/// fopen 风格模式串中表示写模式的字符
pub const WRITE_MODE_FLAG: char = 'w';
