//! 安全随机数生成模块
//!
//! 为每次哈希生成新的随机盐，使用操作系统提供的 CSPRNG。

use crate::error::{AlgorithmFailure, Error, Result};

/// 盐的默认长度（字节），bcrypt 固定为 16 字节
pub const SALT_LENGTH: usize = 16;

/// 生成一个 16 字节的随机盐
///
/// # Example
///
/// ```rust
/// use hashbench::random::generate_salt;
///
/// let a = generate_salt().unwrap();
/// let b = generate_salt().unwrap();
/// assert_ne!(a, b);
/// ```
pub fn generate_salt() -> Result<[u8; SALT_LENGTH]> {
    let mut salt = [0u8; SALT_LENGTH];
    fill_random(&mut salt)?;
    Ok(salt)
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::fill(buf)
        .map_err(|e| Error::Algorithm(AlgorithmFailure::SaltGeneration(e.to_string())))
}
