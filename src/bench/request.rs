//! 基准测试请求与参数范围

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::password::{
    ARGON2_MAX_HASH_LENGTH, ARGON2_MAX_PARALLELISM, ARGON2_MIN_HASH_LENGTH,
    ARGON2_MIN_MEMORY_PER_LANE_KIB, Argon2Settings, BCRYPT_MAX_COST, BCRYPT_MIN_COST,
};

/// 宽松范围下的内存成本上限（4 GiB）
pub const PERMISSIVE_MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;

/// 一次基准测试的全部输入
///
/// 所有成本参数都是显式字段，按值传递，不存在任何全局可变配置。
#[derive(Clone, PartialEq, Eq)]
pub struct BenchmarkRequest {
    /// 被哈希的明文（允许为空，此时得到的是退化的哈希）
    pub secret: Vec<u8>,
    /// bcrypt cost（有效范围 4-31，工作量为 2^cost）
    pub bcrypt_cost: u32,
    /// Argon2id 参数
    pub argon: Argon2Settings,
}

impl Default for BenchmarkRequest {
    fn default() -> Self {
        Self {
            secret: b"senha123".to_vec(),
            bcrypt_cost: 12,
            argon: Argon2Settings::default(),
        }
    }
}

// 明文不应出现在日志中
impl fmt::Debug for BenchmarkRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkRequest")
            .field(
                "secret",
                &format_args!("[{} bytes redacted]", self.secret.len()),
            )
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("argon", &self.argon)
            .finish()
    }
}

impl BenchmarkRequest {
    /// 使用默认成本参数创建请求
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashbench::BenchmarkRequest;
    ///
    /// let request = BenchmarkRequest::new("senha123")
    ///     .with_bcrypt_cost(10)
    ///     .with_argon_memory_kib(32 * 1024);
    /// assert_eq!(request.bcrypt_cost, 10);
    /// assert_eq!(request.argon.memory_kib, 32768);
    /// ```
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ..Self::default()
        }
    }

    /// 设置明文
    pub fn with_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.secret = secret.as_ref().to_vec();
        self
    }

    /// 设置 bcrypt cost
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// 整体替换 Argon2id 参数
    pub fn with_argon(mut self, settings: Argon2Settings) -> Self {
        self.argon = settings;
        self
    }

    /// 设置 Argon2id 迭代次数
    pub fn with_argon_time_cost(mut self, time_cost: u32) -> Self {
        self.argon.time_cost = time_cost;
        self
    }

    /// 设置 Argon2id 内存成本（KiB）
    pub fn with_argon_memory_kib(mut self, memory_kib: u32) -> Self {
        self.argon.memory_kib = memory_kib;
        self
    }

    /// 设置 Argon2id 并行度
    pub fn with_argon_parallelism(mut self, parallelism: u32) -> Self {
        self.argon.parallelism = parallelism;
        self
    }

    /// 设置 Argon2id 输出长度
    pub fn with_argon_hash_length(mut self, hash_length: usize) -> Self {
        self.argon.hash_length = hash_length;
        self
    }

    /// 检查各参数是否落在给定范围内
    ///
    /// 执行器本身没有超时机制，过大的成本会一直阻塞到计算完成，
    /// 调用方应在执行前用这个方法约束输入。
    /// 这里只检查单个参数的范围；内存与并行度的组合由 Argon2id 自己校验，
    /// 失败会记录在报告中。
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashbench::{BenchmarkRequest, ParameterBounds};
    ///
    /// let bounds = ParameterBounds::recommended();
    /// assert!(BenchmarkRequest::default().check_bounds(&bounds).is_ok());
    /// assert!(BenchmarkRequest::default().with_bcrypt_cost(20).check_bounds(&bounds).is_err());
    /// ```
    pub fn check_bounds(&self, bounds: &ParameterBounds) -> Result<()> {
        check("bcrypt cost", self.bcrypt_cost, &bounds.bcrypt_cost)?;
        check("argon2 time cost", self.argon.time_cost, &bounds.time_cost)?;
        check(
            "argon2 memory cost (KiB)",
            self.argon.memory_kib,
            &bounds.memory_kib,
        )?;
        check(
            "argon2 parallelism",
            self.argon.parallelism,
            &bounds.parallelism,
        )?;
        if !bounds.hash_length.contains(&self.argon.hash_length) {
            return Err(Error::out_of_range(
                "argon2 hash length",
                self.argon.hash_length as u64,
                *bounds.hash_length.start() as u64,
                *bounds.hash_length.end() as u64,
            ));
        }
        Ok(())
    }
}

fn check(parameter: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Error::out_of_range(
            parameter,
            u64::from(value),
            u64::from(*range.start()),
            u64::from(*range.end()),
        ))
    }
}

/// 输入参数的允许范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBounds {
    /// bcrypt cost
    pub bcrypt_cost: RangeInclusive<u32>,
    /// Argon2id 迭代次数
    pub time_cost: RangeInclusive<u32>,
    /// Argon2id 内存成本（KiB）
    pub memory_kib: RangeInclusive<u32>,
    /// Argon2id 并行度
    pub parallelism: RangeInclusive<u32>,
    /// Argon2id 输出长度（字节）
    pub hash_length: RangeInclusive<usize>,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self::recommended()
    }
}

impl ParameterBounds {
    /// 推荐范围，避免交互使用时出现过长的等待
    pub fn recommended() -> Self {
        Self {
            bcrypt_cost: BCRYPT_MIN_COST..=15,
            time_cost: 1..=5,
            memory_kib: 8 * 1024..=64 * 1024,
            parallelism: 1..=8,
            hash_length: ARGON2_MIN_HASH_LENGTH..=ARGON2_MAX_HASH_LENGTH,
        }
    }

    /// 算法本身允许的完整范围，内存成本封顶 4 GiB
    pub fn permissive() -> Self {
        Self {
            bcrypt_cost: BCRYPT_MIN_COST..=BCRYPT_MAX_COST,
            time_cost: 1..=u32::MAX,
            memory_kib: ARGON2_MIN_MEMORY_PER_LANE_KIB..=PERMISSIVE_MAX_MEMORY_KIB,
            parallelism: 1..=ARGON2_MAX_PARALLELISM,
            hash_length: ARGON2_MIN_HASH_LENGTH..=ARGON2_MAX_HASH_LENGTH,
        }
    }

    /// 设置 bcrypt cost 范围
    pub fn with_bcrypt_cost(mut self, range: RangeInclusive<u32>) -> Self {
        self.bcrypt_cost = range;
        self
    }

    /// 设置迭代次数范围
    pub fn with_time_cost(mut self, range: RangeInclusive<u32>) -> Self {
        self.time_cost = range;
        self
    }

    /// 设置内存成本范围
    pub fn with_memory_kib(mut self, range: RangeInclusive<u32>) -> Self {
        self.memory_kib = range;
        self
    }

    /// 设置并行度范围
    pub fn with_parallelism(mut self, range: RangeInclusive<u32>) -> Self {
        self.parallelism = range;
        self
    }
}
