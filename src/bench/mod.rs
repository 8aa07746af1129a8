//! 基准测试模块
//!
//! 给定明文和各算法的成本参数，依次计算一次 bcrypt 与一次 Argon2id 哈希，
//! 返回各自的墙钟耗时。
//!
//! ## 示例
//!
//! ```rust
//! use hashbench::bench::{BenchmarkRequest, run};
//!
//! let request = BenchmarkRequest::new("senha123")
//!     .with_bcrypt_cost(4)
//!     .with_argon_memory_kib(1024)
//!     .with_argon_time_cost(1);
//!
//! let report = run(request);
//! for result in report.results() {
//!     match result.elapsed_seconds() {
//!         Some(secs) => println!("{}: {:.3}s", result.algorithm, secs),
//!         None => println!("{}: {}", result.algorithm, result.error_message().unwrap_or("")),
//!     }
//! }
//! ```
//!
//! ### 自定义哈希原语
//!
//! ```rust
//! use hashbench::bench::BenchmarkRunner;
//! use hashbench::password::{BcryptHasher, HashPrimitive};
//!
//! let runner = BenchmarkRunner::new()
//!     .with_primitive(Box::new(BcryptHasher::new(4)))
//!     .with_primitive(Box::new(BcryptHasher::new(5)));
//! let report = runner.run(b"secret");
//! assert_eq!(report.len(), 2);
//! ```

pub mod report;
pub mod request;
mod runner;

pub use report::{AlgorithmResult, BenchmarkReport, FailureKind, Outcome};
pub use request::{BenchmarkRequest, PERMISSIVE_MAX_MEMORY_KIB, ParameterBounds};
pub use runner::{BenchmarkRunner, SweepParameter, SweepPoint, run, sweep};
