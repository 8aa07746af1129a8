//! 密码哈希模块
//!
//! 基准测试所调用的哈希原语。
//!
//! ## 支持的算法
//!
//! - **bcrypt**: 经典的成本因子哈希，难度随 cost 指数增长
//! - **Argon2id**: 内存硬哈希算法，抵抗 GPU/ASIC 并行攻击
//!
//! ## 示例
//!
//! ```rust
//! use hashbench::password::{Argon2Hasher, Argon2Settings, HashPrimitive, verify_password};
//!
//! let hasher = Argon2Hasher::new(Argon2Settings::new(1, 256, 1));
//! let hash = hasher.hash(b"my_password").unwrap();
//! assert!(verify_password(b"my_password", &hash).unwrap());
//! ```

mod hasher;

pub use hasher::{
    ARGON2_MAX_HASH_LENGTH, ARGON2_MAX_PARALLELISM, ARGON2_MIN_HASH_LENGTH,
    ARGON2_MIN_MEMORY_PER_LANE_KIB, Algorithm, Argon2Hasher, Argon2Settings, BCRYPT_MAX_COST,
    BCRYPT_MIN_COST, BcryptHasher, HashPrimitive, verify_password,
};
