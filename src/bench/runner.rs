//! 基准执行器
//!
//! 按固定顺序逐个调用哈希原语并计时。单线程同步执行：
//! 两个算法并发运行会互相争抢资源，使墙钟时间失真。

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::report::{AlgorithmResult, BenchmarkReport};
use super::request::BenchmarkRequest;
use crate::error::{ConfigError, Error, Result};
use crate::password::{Algorithm, Argon2Hasher, BcryptHasher, HashPrimitive};

/// 基准执行器
///
/// 持有一组按执行顺序排列的哈希原语。执行器本身不保存可变状态，
/// 同一个实例可以重复调用 [`BenchmarkRunner::run`]。
#[derive(Default)]
pub struct BenchmarkRunner {
    primitives: Vec<Box<dyn HashPrimitive>>,
}

impl fmt::Debug for BenchmarkRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkRunner")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

impl BenchmarkRunner {
    /// 创建不含任何算法的执行器
    pub fn new() -> Self {
        Self::default()
    }

    /// 按请求配置标准的两个算法：先 bcrypt，后 Argon2id
    pub fn for_request(request: &BenchmarkRequest) -> Self {
        Algorithm::ALL.iter().fold(Self::new(), |runner, algorithm| {
            runner.with_primitive(primitive_for(request, *algorithm))
        })
    }

    /// 只配置单个算法
    pub fn for_algorithm(request: &BenchmarkRequest, algorithm: Algorithm) -> Self {
        Self::new().with_primitive(primitive_for(request, algorithm))
    }

    /// 追加一个哈希原语，执行顺序即追加顺序
    pub fn with_primitive(mut self, primitive: Box<dyn HashPrimitive>) -> Self {
        self.primitives.push(primitive);
        self
    }

    /// 已配置的算法名称
    pub fn algorithms(&self) -> Vec<&str> {
        self.primitives.iter().map(|p| p.name()).collect()
    }

    /// 对 `secret` 依次执行每个算法并计时
    ///
    /// 单个算法失败只记录在它自己的结果中，不影响其余算法；
    /// 报告中每个已配置的算法恰好一条记录。失败不会重试。
    pub fn run(&self, secret: &[u8]) -> BenchmarkReport {
        let mut report = BenchmarkReport::new();
        for primitive in &self.primitives {
            report.push(time_primitive(primitive.as_ref(), secret));
        }
        report
    }
}

fn primitive_for(request: &BenchmarkRequest, algorithm: Algorithm) -> Box<dyn HashPrimitive> {
    match algorithm {
        Algorithm::Bcrypt => Box::new(BcryptHasher::new(request.bcrypt_cost)),
        Algorithm::Argon2id => Box::new(Argon2Hasher::new(request.argon)),
    }
}

fn time_primitive(primitive: &dyn HashPrimitive, secret: &[u8]) -> AlgorithmResult {
    let algorithm = primitive.name();
    debug!(algorithm, "starting hash benchmark");

    let start = Instant::now();
    let outcome = primitive.hash(secret);
    let elapsed = start.elapsed();

    match outcome {
        Ok(_) => {
            info!(
                algorithm,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "hash benchmark completed"
            );
            AlgorithmResult::completed(algorithm, elapsed)
        }
        Err(err) => {
            warn!(algorithm, error = %err, "hash benchmark failed");
            AlgorithmResult::failed(algorithm, &err)
        }
    }
}

/// 执行一次完整的基准测试（bcrypt，然后 Argon2id）
///
/// # Example
///
/// ```rust
/// use hashbench::BenchmarkRequest;
///
/// let request = BenchmarkRequest::new("senha123")
///     .with_bcrypt_cost(4)
///     .with_argon_time_cost(1)
///     .with_argon_memory_kib(64)
///     .with_argon_parallelism(1);
///
/// let report = hashbench::run(request);
/// assert_eq!(report.algorithms(), vec!["bcrypt", "argon2id"]);
/// assert!(report.all_succeeded());
/// ```
pub fn run(request: BenchmarkRequest) -> BenchmarkReport {
    BenchmarkRunner::for_request(&request).run(&request.secret)
}

// ============================================================================
// 成本扫描
// ============================================================================

/// 可扫描的成本参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepParameter {
    /// bcrypt cost
    BcryptCost,
    /// Argon2id 迭代次数
    ArgonTimeCost,
    /// Argon2id 内存成本（KiB）
    ArgonMemory,
    /// Argon2id 并行度
    ArgonParallelism,
}

impl SweepParameter {
    /// 该参数所属的算法
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SweepParameter::BcryptCost => Algorithm::Bcrypt,
            _ => Algorithm::Argon2id,
        }
    }

    /// 参数名称
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepParameter::BcryptCost => "bcrypt-cost",
            SweepParameter::ArgonTimeCost => "argon-time-cost",
            SweepParameter::ArgonMemory => "argon-memory",
            SweepParameter::ArgonParallelism => "argon-parallelism",
        }
    }

    /// 把参数值写入请求
    pub fn apply(&self, request: BenchmarkRequest, value: u32) -> BenchmarkRequest {
        match self {
            SweepParameter::BcryptCost => request.with_bcrypt_cost(value),
            SweepParameter::ArgonTimeCost => request.with_argon_time_cost(value),
            SweepParameter::ArgonMemory => request.with_argon_memory_kib(value),
            SweepParameter::ArgonParallelism => request.with_argon_parallelism(value),
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SweepParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bcrypt-cost" => Ok(SweepParameter::BcryptCost),
            "argon-time-cost" => Ok(SweepParameter::ArgonTimeCost),
            "argon-memory" => Ok(SweepParameter::ArgonMemory),
            "argon-parallelism" => Ok(SweepParameter::ArgonParallelism),
            other => Err(Error::Config(ConfigError::InvalidValue {
                key: "sweep parameter".to_string(),
                message: format!("unknown parameter '{}'", other),
            })),
        }
    }
}

/// 扫描中的一个点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// 参数值
    pub value: u32,
    /// 该值下的单算法结果
    pub result: AlgorithmResult,
}

/// 固定其余参数，逐个取 `values` 中的值重新测量参数所属的算法
///
/// 只运行该参数影响的那个算法，结果顺序与 `values` 一致。
///
/// # Example
///
/// ```rust
/// use hashbench::{BenchmarkRequest, SweepParameter, sweep};
///
/// let request = BenchmarkRequest::default();
/// let points = sweep(&request, SweepParameter::BcryptCost, [4, 5, 6]);
/// assert_eq!(points.len(), 3);
/// assert!(points.iter().all(|p| p.result.algorithm == "bcrypt"));
/// ```
pub fn sweep(
    request: &BenchmarkRequest,
    parameter: SweepParameter,
    values: impl IntoIterator<Item = u32>,
) -> Vec<SweepPoint> {
    let algorithm = parameter.algorithm();
    values
        .into_iter()
        .map(|value| {
            let point_request = parameter.apply(request.clone(), value);
            debug!(parameter = %parameter, value, "sweep step");
            let primitive = primitive_for(&point_request, algorithm);
            let result = time_primitive(primitive.as_ref(), &point_request.secret);
            SweepPoint { value, result }
        })
        .collect()
}
