//! 批处理参数. 所有参数都来自环境变量, 未设置时使用默认值.

use std::env;
use std::fmt;
use std::str::FromStr;
use swab_berry::consts::{DEFAULT_SMOOTHING_WINDOW, DEFAULT_STEP_FACTOR, DEFAULT_TOTAL_FACTOR};
use swab_berry::outline::IterativeSpec;
use swab_berry::OutlineResult;

/// 读取环境变量 `name` 并解析, 未设置时返回 `default`.
///
/// 变量存在但无法解析时返回错误信息.
pub fn env_or<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map_err(|e| format!("environment variable `{name}` = `{v}`: {e}")),
        _ => Ok(default),
    }
}

/// 批处理参数.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// 滑动平均窗口 (`$SWAB_WINDOW`).
    pub window: usize,

    /// 总缩放倍率 (`$SWAB_TOTAL_FACTOR`).
    pub total_factor: u32,

    /// 单步缩放倍率 (`$SWAB_STEP_FACTOR`).
    pub step_factor: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
            total_factor: DEFAULT_TOTAL_FACTOR,
            step_factor: DEFAULT_STEP_FACTOR,
        }
    }
}

impl BatchConfig {
    /// 从环境变量读取.
    pub fn from_env() -> Result<Self, String> {
        let d = Self::default();
        Ok(Self {
            window: env_or("SWAB_WINDOW", d.window)?,
            total_factor: env_or("SWAB_TOTAL_FACTOR", d.total_factor)?,
            step_factor: env_or("SWAB_STEP_FACTOR", d.step_factor)?,
        })
    }

    /// 转换为已验证的迭代参数.
    #[inline]
    pub fn iterative_spec(&self) -> OutlineResult<IterativeSpec> {
        IterativeSpec::new(self.window, self.total_factor, self.step_factor)
    }
}

/// 日志等级 (`$SWAB_LOG`), 默认 `info`.
pub fn log_level() -> log::LevelFilter {
    env_or("SWAB_LOG", log::LevelFilter::Info).unwrap_or(log::LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let spec = BatchConfig::default().iterative_spec().unwrap();
        assert_eq!(spec.iterations(), 3);
    }

    #[test]
    fn test_env_or() {
        env::set_var("SWAB_UTILS_TEST_OK", " 7 ");
        env::set_var("SWAB_UTILS_TEST_BAD", "-3");
        assert_eq!(env_or("SWAB_UTILS_TEST_OK", 1usize), Ok(7));
        assert!(env_or("SWAB_UTILS_TEST_BAD", 1usize).is_err());
        assert_eq!(env_or("SWAB_UTILS_TEST_UNSET", 5usize), Ok(5));
    }
}
