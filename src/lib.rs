//! # HashBench
//!
//! 在可调成本参数下比较 bcrypt 与 Argon2id 的哈希耗时。
//!
//! ## 功能特性
//!
//! - **基准执行**: 按固定顺序（先 bcrypt，后 Argon2id）各计算一次真实哈希并计时
//! - **逐算法失败**: 参数错误或算法内部错误只记录在对应算法的结果中，不中断整次测试
//! - **成本扫描**: 固定其余参数，观察单个成本参数增长时耗时的变化
//! - **文本展示**: 结果表、条形图和扫描表
//!
//! ## Features
//!
//! - `cli` - 构建 `hashbench` 命令行工具（默认启用）
//!
//! ## 基准测试示例
//!
//! ```rust
//! use hashbench::{BenchmarkRequest, run};
//!
//! let request = BenchmarkRequest::new("senha123")
//!     .with_bcrypt_cost(4)
//!     .with_argon_time_cost(1)
//!     .with_argon_memory_kib(256)
//!     .with_argon_parallelism(1);
//!
//! let report = run(request);
//! assert_eq!(report.algorithms(), vec!["bcrypt", "argon2id"]);
//! for result in report.results() {
//!     assert!(result.elapsed_seconds().unwrap() >= 0.0);
//! }
//! ```
//!
//! ## 参数失败示例
//!
//! ```rust
//! use hashbench::{BenchmarkRequest, FailureKind, run};
//!
//! // 8 条通道至少需要 64 KiB
//! let request = BenchmarkRequest::new("senha123")
//!     .with_bcrypt_cost(4)
//!     .with_argon_memory_kib(8)
//!     .with_argon_parallelism(8);
//!
//! let report = run(request);
//! assert!(report.get("bcrypt").unwrap().is_success());
//! assert_eq!(
//!     report.get("argon2id").unwrap().failure_kind(),
//!     Some(FailureKind::Parameter)
//! );
//! ```

pub mod bench;
pub mod error;
pub mod password;
pub mod random;
pub mod render;

pub use error::{Error, Result};

// ============================================================================
// 基准测试相关导出
// ============================================================================

pub use bench::{
    AlgorithmResult, BenchmarkReport, BenchmarkRequest, BenchmarkRunner, FailureKind, Outcome,
    ParameterBounds, SweepParameter, SweepPoint, run, sweep,
};

// ============================================================================
// 密码哈希相关导出
// ============================================================================

pub use password::{Algorithm, Argon2Hasher, Argon2Settings, BcryptHasher, HashPrimitive};
