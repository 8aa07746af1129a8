//! 基准测试结果
//!
//! 报告只在一次请求/响应周期内存在，每次调用都重新创建，不做持久化。

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 参数超出算法允许的范围
    Parameter,
    /// 哈希原语内部错误
    Algorithm,
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        if err.is_parameter_error() {
            FailureKind::Parameter
        } else {
            FailureKind::Algorithm
        }
    }
}

/// 单个算法的执行结果
///
/// 失败时不记录耗时，既不是零也不是缺省值，而是显式的 `Failed`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// 哈希计算完成
    Completed {
        /// 墙钟耗时（秒）
        elapsed_seconds: f64,
    },
    /// 哈希计算失败
    Failed {
        /// 失败类别
        kind: FailureKind,
        /// 错误信息
        message: String,
    },
}

/// 报告中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// 算法名称
    pub algorithm: String,
    /// 结果
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl AlgorithmResult {
    /// 创建成功记录
    pub fn completed(algorithm: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            algorithm: algorithm.into(),
            outcome: Outcome::Completed {
                elapsed_seconds: elapsed.as_secs_f64(),
            },
        }
    }

    /// 从错误创建失败记录
    pub fn failed(algorithm: impl Into<String>, err: &Error) -> Self {
        Self {
            algorithm: algorithm.into(),
            outcome: Outcome::Failed {
                kind: FailureKind::from(err),
                message: err.to_string(),
            },
        }
    }

    /// 是否成功
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Completed { .. })
    }

    /// 耗时（秒），失败时为 `None`
    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Completed { elapsed_seconds } => Some(elapsed_seconds),
            Outcome::Failed { .. } => None,
        }
    }

    /// 耗时，失败时为 `None`
    ///
    /// 反序列化得到的负数、NaN 或溢出的秒数同样返回 `None`。
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed_seconds()
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }

    /// 错误信息，成功时为 `None`
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Completed { .. } => None,
            Outcome::Failed { message, .. } => Some(message),
        }
    }

    /// 失败类别，成功时为 `None`
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            Outcome::Completed { .. } => None,
            Outcome::Failed { kind, .. } => Some(*kind),
        }
    }
}

/// 一次基准测试的完整报告
///
/// 记录顺序即执行顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 每个算法一条记录
    pub results: Vec<AlgorithmResult>,
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    /// 追加一条记录
    pub fn push(&mut self, result: AlgorithmResult) {
        self.results.push(result);
    }

    /// 全部记录
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// 按算法名称查找
    pub fn get(&self, algorithm: &str) -> Option<&AlgorithmResult> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }

    /// 记录数
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 算法名称，按执行顺序
    pub fn algorithms(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.algorithm.as_str()).collect()
    }

    /// 是否全部成功
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(AlgorithmResult::is_success)
    }

    /// 失败的记录
    pub fn failures(&self) -> impl Iterator<Item = &AlgorithmResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// 最快的成功记录
    pub fn fastest(&self) -> Option<&AlgorithmResult> {
        self.successes()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }

    /// 最慢的成功记录
    pub fn slowest(&self) -> Option<&AlgorithmResult> {
        self.successes()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }

    fn successes(&self) -> impl Iterator<Item = (&AlgorithmResult, f64)> {
        self.results
            .iter()
            .filter_map(|r| r.elapsed_seconds().map(|s| (r, s)))
    }

    /// 序列化为格式化的 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("failed to serialize report: {}", e)))
    }
}
