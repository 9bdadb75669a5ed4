//! 运行时错误.

use std::fmt;
use std::path::PathBuf;

/// 轮廓处理的运行时错误.
#[derive(Debug)]
pub enum OutlineError {
    /// 非法参数. `op` 为出错的操作名, `reason` 描述了出错的取值.
    InvalidArgument {
        /// 操作名.
        op: &'static str,

        /// 出错原因.
        reason: String,
    },

    /// 格式错误的输入 (奇数长度坐标序列, 文本中的非整数等).
    ///
    /// `line` 为出错的行号 (从 1 开始), 不来自文件时为 `None`.
    MalformedInput {
        /// 行号.
        line: Option<usize>,

        /// 出错原因.
        reason: String,
    },

    /// 不支持的文件格式 (根据扩展名判断).
    UnsupportedFormat(PathBuf),

    /// 底层 I/O 错误, 同时记录出错的路径.
    Io {
        /// 出错路径.
        path: PathBuf,

        /// 底层错误.
        source: std::io::Error,
    },

    /// 读取 npy 文件错误.
    Npy(ndarray_npy::ReadNpyError),
}

/// 轮廓处理运行时结果.
pub type OutlineResult<T> = Result<T, OutlineError>;

impl OutlineError {
    #[inline]
    pub(crate) fn invalid(op: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            op,
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn malformed(line: Option<usize>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为非法参数错误.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// 是否为输入格式错误.
    #[inline]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { op, reason } => write!(f, "invalid argument to `{op}`: {reason}"),
            Self::MalformedInput {
                line: Some(line),
                reason,
            } => write!(f, "malformed input at line {line}: {reason}"),
            Self::MalformedInput { line: None, reason } => write!(f, "malformed input: {reason}"),
            Self::UnsupportedFormat(path) => write!(
                f,
                "unsupported file format `{}`, expected a .txt or .npy file",
                path.display()
            ),
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Npy(e) => write!(f, "npy error: {e}"),
        }
    }
}

impl std::error::Error for OutlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Npy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray_npy::ReadNpyError> for OutlineError {
    #[inline]
    fn from(e: ndarray_npy::ReadNpyError) -> Self {
        Self::Npy(e)
    }
}
