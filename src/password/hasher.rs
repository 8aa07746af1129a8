//! 密码哈希原语
//!
//! 基准测试调用的两个外部哈希实现：bcrypt 与 Argon2id。
//! 二者都实现 [`HashPrimitive`]，失败时返回可区分的错误，而不是静默产出结果。

use std::fmt;

use argon2::{Argon2, Block, Params, Version};
use password_hash::{Output, ParamsString, PasswordHash, PasswordVerifier as _, SaltString};

use crate::error::{AlgorithmFailure, Error, ParameterError, Result};
use crate::random::generate_salt;

/// bcrypt 允许的最小 cost
pub const BCRYPT_MIN_COST: u32 = 4;
/// bcrypt 允许的最大 cost
pub const BCRYPT_MAX_COST: u32 = 31;

/// Argon2 每条并行通道至少需要的内存（KiB）
pub const ARGON2_MIN_MEMORY_PER_LANE_KIB: u32 = 8;
/// Argon2 允许的最大并行度（2^24 - 1）
pub const ARGON2_MAX_PARALLELISM: u32 = 0x00FF_FFFF;
/// PHC 编码字符串要求的最小输出长度（字节），比 Argon2 本身的下限 4 更严格
pub const ARGON2_MIN_HASH_LENGTH: usize = 10;
/// PHC 编码字符串能容纳的最大输出长度（字节）
pub const ARGON2_MAX_HASH_LENGTH: usize = 64;

/// 参与基准测试的哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// bcrypt - 成本因子哈希，工作量为 2^cost
    Bcrypt,

    /// Argon2id - 内存硬哈希，
    /// 结合了 Argon2i（抵抗侧信道攻击）和 Argon2d（抵抗 GPU 攻击）的优点
    Argon2id,
}

impl Algorithm {
    /// 固定的执行顺序：先 bcrypt，后 Argon2id
    pub const ALL: [Algorithm; 2] = [Algorithm::Bcrypt, Algorithm::Argon2id];

    /// 报告中使用的算法名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 哈希原语接口
///
/// 基准执行器只依赖这个 trait，把具体算法当作黑盒调用。
/// 实现必须真正计算哈希，而不是模拟耗时。
pub trait HashPrimitive: Send + Sync {
    /// 报告中显示的算法名称
    fn name(&self) -> &str;

    /// 为 `secret` 生成一个新的编码哈希（每次使用新的随机盐）
    fn hash(&self, secret: &[u8]) -> Result<String>;
}

// ============================================================================
// bcrypt 实现
// ============================================================================

/// bcrypt 哈希器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: 12 }
    }
}

impl BcryptHasher {
    /// 创建指定 cost 的 bcrypt 哈希器
    ///
    /// cost 在调用 [`HashPrimitive::hash`] 时才校验，
    /// 越界的 cost 会产生 [`ParameterError::OutOfRange`]。
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 当前 cost
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl HashPrimitive for BcryptHasher {
    fn name(&self) -> &str {
        Algorithm::Bcrypt.as_str()
    }

    /// 生成随机盐并以 `2^cost` 轮计算 bcrypt 哈希
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashbench::password::{BcryptHasher, HashPrimitive};
    ///
    /// let hash = BcryptHasher::new(4).hash(b"senha123").unwrap();
    /// assert!(hash.starts_with("$2b$04$"));
    /// ```
    fn hash(&self, secret: &[u8]) -> Result<String> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.cost) {
            return Err(Error::out_of_range(
                "bcrypt cost",
                u64::from(self.cost),
                u64::from(BCRYPT_MIN_COST),
                u64::from(BCRYPT_MAX_COST),
            ));
        }

        let salt = generate_salt()?;
        bcrypt::hash_with_salt(secret, self.cost, salt)
            .map(|parts| parts.format_for_version(bcrypt::Version::TwoB))
            .map_err(map_bcrypt_error)
    }
}

fn map_bcrypt_error(err: bcrypt::BcryptError) -> Error {
    let message = err.to_string();
    match err {
        bcrypt::BcryptError::CostNotAllowed(_) | bcrypt::BcryptError::InvalidCost(_) => {
            Error::Parameter(ParameterError::Rejected {
                algorithm: Algorithm::Bcrypt.as_str().to_string(),
                message,
            })
        }
        _ => Error::Algorithm(AlgorithmFailure::HashFailed {
            algorithm: Algorithm::Bcrypt.as_str().to_string(),
            message,
        }),
    }
}

// ============================================================================
// Argon2id 实现
// ============================================================================

/// Argon2id 的成本参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    /// 迭代次数（time cost）
    pub time_cost: u32,
    /// 内存成本（KiB）
    pub memory_kib: u32,
    /// 并行通道数（算法内部的 lane 数，不是外部并发）
    pub parallelism: u32,
    /// 输出哈希长度（字节）
    pub hash_length: usize,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            time_cost: 2,
            memory_kib: 16 * 1024,
            parallelism: 2,
            hash_length: 32,
        }
    }
}

impl Argon2Settings {
    /// 创建新的参数集
    pub fn new(time_cost: u32, memory_kib: u32, parallelism: u32) -> Self {
        Self {
            time_cost,
            memory_kib,
            parallelism,
            ..Self::default()
        }
    }

    /// 设置迭代次数
    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    /// 设置内存成本（KiB）
    pub fn with_memory_kib(mut self, memory_kib: u32) -> Self {
        self.memory_kib = memory_kib;
        self
    }

    /// 设置并行度
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// 设置输出长度
    pub fn with_hash_length(mut self, hash_length: usize) -> Self {
        self.hash_length = hash_length;
        self
    }

    /// 当前并行度所需的最小内存（KiB）
    pub fn required_memory_kib(&self) -> u64 {
        u64::from(self.parallelism) * u64::from(ARGON2_MIN_MEMORY_PER_LANE_KIB)
    }

    /// 校验参数组合是否能被 Argon2id 接受
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashbench::password::Argon2Settings;
    ///
    /// assert!(Argon2Settings::new(2, 16384, 2).validate().is_ok());
    /// // 8 条通道至少需要 64 KiB
    /// assert!(Argon2Settings::new(2, 8, 8).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.time_cost == 0 {
            return Err(Error::out_of_range(
                "argon2 time cost",
                0,
                1,
                u64::from(u32::MAX),
            ));
        }
        if !(1..=ARGON2_MAX_PARALLELISM).contains(&self.parallelism) {
            return Err(Error::out_of_range(
                "argon2 parallelism",
                u64::from(self.parallelism),
                1,
                u64::from(ARGON2_MAX_PARALLELISM),
            ));
        }
        let required_kib = self.required_memory_kib();
        if u64::from(self.memory_kib) < required_kib {
            return Err(Error::Parameter(ParameterError::MemoryTooLow {
                memory_kib: self.memory_kib,
                parallelism: self.parallelism,
                required_kib,
            }));
        }
        if !(ARGON2_MIN_HASH_LENGTH..=ARGON2_MAX_HASH_LENGTH).contains(&self.hash_length) {
            return Err(Error::out_of_range(
                "argon2 hash length",
                self.hash_length as u64,
                ARGON2_MIN_HASH_LENGTH as u64,
                ARGON2_MAX_HASH_LENGTH as u64,
            ));
        }
        Ok(())
    }

    fn to_params(self) -> Result<Params> {
        Params::new(
            self.memory_kib,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length),
        )
        .map_err(|e| {
            Error::Parameter(ParameterError::Rejected {
                algorithm: Algorithm::Argon2id.as_str().to_string(),
                message: e.to_string(),
            })
        })
    }
}

/// Argon2id 哈希器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Argon2Hasher {
    settings: Argon2Settings,
}

impl Argon2Hasher {
    /// 使用指定参数创建哈希器
    pub fn new(settings: Argon2Settings) -> Self {
        Self { settings }
    }

    /// 当前参数
    pub fn settings(&self) -> &Argon2Settings {
        &self.settings
    }
}

impl HashPrimitive for Argon2Hasher {
    fn name(&self) -> &str {
        Algorithm::Argon2id.as_str()
    }

    /// 计算 Argon2id (v0x13) 哈希，返回内嵌参数和盐的 PHC 字符串
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashbench::password::{Argon2Hasher, Argon2Settings, HashPrimitive};
    ///
    /// let hasher = Argon2Hasher::new(Argon2Settings::new(1, 64, 1));
    /// let hash = hasher.hash(b"senha123").unwrap();
    /// assert!(hash.starts_with("$argon2id$v=19$m=64,t=1,p=1$"));
    /// ```
    fn hash(&self, secret: &[u8]) -> Result<String> {
        self.settings.validate()?;
        let params = self.settings.to_params()?;
        let params_string = ParamsString::try_from(&params)
            .map_err(map_password_hash_error)?;

        let salt_bytes = generate_salt()?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            Error::Algorithm(AlgorithmFailure::SaltGeneration(format!(
                "failed to encode salt: {}",
                e
            )))
        })?;

        let mut blocks = allocate_blocks(params.block_count())?;
        let mut output = vec![0u8; self.settings.hash_length];
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into_with_memory(secret, &salt_bytes, &mut output, &mut blocks)
            .map_err(map_argon2_error)?;

        let encoded = PasswordHash {
            algorithm: argon2::ARGON2ID_IDENT,
            version: Some(Version::V0x13 as u32),
            params: params_string,
            salt: Some(salt.as_salt()),
            hash: Some(Output::new(&output).map_err(map_password_hash_error)?),
        };
        Ok(encoded.to_string())
    }
}

/// 分配 Argon2 的块缓冲区（每块 1 KiB）
///
/// 内存成本可达 GiB 级别，分配失败时返回 [`AlgorithmFailure::HashFailed`]，
/// 而不是中止进程。
fn allocate_blocks(count: usize) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    blocks.try_reserve_exact(count).map_err(|e| {
        Error::Algorithm(AlgorithmFailure::HashFailed {
            algorithm: Algorithm::Argon2id.as_str().to_string(),
            message: format!("failed to allocate {} KiB of block memory: {}", count, e),
        })
    })?;
    blocks.resize(count, Block::default());
    Ok(blocks)
}

fn map_argon2_error(err: argon2::Error) -> Error {
    let algorithm = Algorithm::Argon2id.as_str().to_string();
    let message = err.to_string();
    match err {
        argon2::Error::MemoryTooLittle
        | argon2::Error::MemoryTooMuch
        | argon2::Error::OutputTooShort
        | argon2::Error::OutputTooLong
        | argon2::Error::ThreadsTooFew
        | argon2::Error::ThreadsTooMany
        | argon2::Error::TimeTooSmall => {
            Error::Parameter(ParameterError::Rejected { algorithm, message })
        }
        _ => Error::Algorithm(AlgorithmFailure::HashFailed { algorithm, message }),
    }
}

fn map_password_hash_error(err: password_hash::Error) -> Error {
    let algorithm = Algorithm::Argon2id.as_str().to_string();
    let message = err.to_string();
    match err {
        password_hash::Error::ParamValueInvalid(_)
        | password_hash::Error::ParamsMaxExceeded
        | password_hash::Error::OutputSize { .. } => {
            Error::Parameter(ParameterError::Rejected { algorithm, message })
        }
        _ => Error::Algorithm(AlgorithmFailure::HashFailed { algorithm, message }),
    }
}

// ============================================================================
// 验证
// ============================================================================

/// 验证 `secret` 是否与编码哈希匹配
///
/// 自动识别 bcrypt（`$2`）与 Argon2（`$argon2`）格式，
/// 用于确认基准测试产出的是真实哈希。
///
/// # Example
///
/// ```rust
/// use hashbench::password::{BcryptHasher, HashPrimitive, verify_password};
///
/// let hash = BcryptHasher::new(4).hash(b"senha123").unwrap();
/// assert!(verify_password(b"senha123", &hash).unwrap());
/// assert!(!verify_password(b"senha124", &hash).unwrap());
/// ```
pub fn verify_password(secret: &[u8], encoded: &str) -> Result<bool> {
    if encoded.starts_with("$argon2") {
        let parsed = PasswordHash::new(encoded).map_err(|e| {
            Error::Algorithm(AlgorithmFailure::InvalidFormat(format!(
                "invalid Argon2 hash: {}",
                e
            )))
        })?;
        return Ok(Argon2::default().verify_password(secret, &parsed).is_ok());
    }
    if encoded.starts_with("$2") {
        return bcrypt::verify(secret, encoded).map_err(|e| {
            Error::Algorithm(AlgorithmFailure::InvalidFormat(format!(
                "bcrypt verify failed: {}",
                e
            )))
        });
    }
    Err(Error::Algorithm(AlgorithmFailure::InvalidFormat(
        "unknown hash format".to_string(),
    )))
}
