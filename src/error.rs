//! 统一错误类型模块
//!
//! 提供 hashbench 中所有操作的错误类型定义。
//!
//! 基准测试本身不会因为单个算法失败而中断：[`ParameterError`] 与
//! [`AlgorithmFailure`] 会被记录进对应算法的结果中，而不是向上传播。

use std::fmt;

/// hashbench 的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// hashbench 的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 成本参数超出算法允许的范围
    Parameter(ParameterError),

    /// 底层哈希原语内部失败
    Algorithm(AlgorithmFailure),

    /// 配置错误
    Config(ConfigError),

    /// 内部错误
    Internal(String),
}

impl Error {
    /// 创建一个内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// 创建一个越界参数错误
    pub fn out_of_range(parameter: &'static str, value: u64, min: u64, max: u64) -> Self {
        Error::Parameter(ParameterError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }

    /// 是否为参数错误
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Error::Parameter(_))
    }
}

/// 参数相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// 参数不在 `[min, max]` 范围内
    OutOfRange {
        parameter: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    /// Argon2 内存不足以支撑所需的并行通道数（每条通道至少 8 KiB）
    MemoryTooLow {
        memory_kib: u32,
        parallelism: u32,
        required_kib: u64,
    },
    /// 哈希原语拒绝了参数组合
    Rejected { algorithm: String, message: String },
}

/// 哈希原语失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmFailure {
    /// 随机盐生成失败
    SaltGeneration(String),
    /// 哈希计算失败
    HashFailed { algorithm: String, message: String },
    /// 无效的哈希格式
    InvalidFormat(String),
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter(e) => write!(f, "Parameter error: {}", e),
            Error::Algorithm(e) => write!(f, "Algorithm failure: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must be between {} and {}, got {}",
                parameter, min, max, value
            ),
            ParameterError::MemoryTooLow {
                memory_kib,
                parallelism,
                required_kib,
            } => write!(
                f,
                "memory cost {} KiB is too low for parallelism {} (requires at least {} KiB)",
                memory_kib, parallelism, required_kib
            ),
            ParameterError::Rejected { algorithm, message } => {
                write!(f, "{} rejected parameters: {}", algorithm, message)
            }
        }
    }
}

impl fmt::Display for AlgorithmFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmFailure::SaltGeneration(msg) => {
                write!(f, "salt generation failed: {}", msg)
            }
            AlgorithmFailure::HashFailed { algorithm, message } => {
                write!(f, "{} hash failed: {}", algorithm, message)
            }
            AlgorithmFailure::InvalidFormat(msg) => write!(f, "invalid hash format: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parameter(e) => Some(e),
            Error::Algorithm(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Internal(_) => None,
        }
    }
}

impl std::error::Error for ParameterError {}
impl std::error::Error for AlgorithmFailure {}
impl std::error::Error for ConfigError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Error::Parameter(err)
    }
}

impl From<AlgorithmFailure> for Error {
    fn from(err: AlgorithmFailure) -> Self {
        Error::Algorithm(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = Error::out_of_range("bcrypt cost", 3, 4, 31);
        assert_eq!(
            err.to_string(),
            "Parameter error: bcrypt cost must be between 4 and 31, got 3"
        );
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_memory_too_low_display() {
        let err = ParameterError::MemoryTooLow {
            memory_kib: 8,
            parallelism: 8,
            required_kib: 64,
        };
        assert_eq!(
            err.to_string(),
            "memory cost 8 KiB is too low for parallelism 8 (requires at least 64 KiB)"
        );
    }

    #[test]
    fn test_error_from_algorithm_failure() {
        let failure = AlgorithmFailure::SaltGeneration("no entropy".to_string());
        let err: Error = failure.into();
        assert!(matches!(err, Error::Algorithm(_)));
        assert!(!err.is_parameter_error());
        assert_eq!(
            err.to_string(),
            "Algorithm failure: salt generation failed: no entropy"
        );
    }

    #[test]
    fn test_error_source_is_inner() {
        use std::error::Error as _;

        let err: Error = ConfigError::InvalidValue {
            key: "step".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into();
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("invalid configuration value for 'step': must be at least 1")
        );
    }
}
