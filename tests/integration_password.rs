//! 集成测试：哈希原语
//!
//! 确认基准测试调用的是真实的哈希计算，并检查参数错误的分类。

use hashbench::error::ParameterError;
use hashbench::password::{
    Argon2Hasher, Argon2Settings, BcryptHasher, HashPrimitive, verify_password,
};
use hashbench::{BenchmarkRequest, Error, ParameterBounds};

/// 测试 bcrypt 哈希内嵌 cost 且可验证
#[test]
fn test_bcrypt_hash_is_real() {
    let hash = BcryptHasher::new(5).hash("senha123".as_bytes()).unwrap();
    assert!(hash.starts_with("$2b$05$"));
    assert_eq!(hash.len(), 60);
    assert!(verify_password(b"senha123", &hash).unwrap());
    assert!(!verify_password(b"senha321", &hash).unwrap());
}

/// 测试 Argon2id 哈希内嵌参数与盐
#[test]
fn test_argon2_hash_embeds_parameters() {
    let settings = Argon2Settings::new(2, 1024, 2).with_hash_length(32);
    let hash = Argon2Hasher::new(settings).hash(b"senha123").unwrap();

    assert!(hash.starts_with("$argon2id$v=19$m=1024,t=2,p=2$"));
    assert!(verify_password(b"senha123", &hash).unwrap());
    assert!(!verify_password(b"senha321", &hash).unwrap());
}

/// 测试 Unicode 明文
#[test]
fn test_unicode_secret() {
    let secret = "密码测试🔐émoji".as_bytes();
    let hash = Argon2Hasher::new(Argon2Settings::new(1, 64, 1))
        .hash(secret)
        .unwrap();
    assert!(verify_password(secret, &hash).unwrap());
}

/// 测试各类参数错误都被归为参数错误
#[test]
fn test_parameter_errors_are_classified() {
    let cases = [
        Argon2Settings::new(0, 1024, 1),
        Argon2Settings::new(1, 1024, 0),
        Argon2Settings::new(1, 8, 8),
        Argon2Settings::new(1, 1024, 1).with_hash_length(128),
    ];
    for settings in cases {
        let err = Argon2Hasher::new(settings).hash(b"x").unwrap_err();
        assert!(err.is_parameter_error(), "{:?} gave {:?}", settings, err);
    }

    let err = BcryptHasher::new(32).hash(b"x").unwrap_err();
    assert!(err.is_parameter_error());
}

/// 测试内存下限随并行度线性增长
#[test]
fn test_memory_requirement_scales_with_parallelism() {
    assert_eq!(Argon2Settings::new(1, 64, 8).required_memory_kib(), 64);
    assert!(Argon2Settings::new(1, 64, 8).validate().is_ok());

    let err = Argon2Settings::new(1, 63, 8).validate().unwrap_err();
    assert_eq!(
        err,
        Error::Parameter(ParameterError::MemoryTooLow {
            memory_kib: 63,
            parallelism: 8,
            required_kib: 64,
        })
    );
}

/// 测试推荐范围的边界值
#[test]
fn test_recommended_bounds_edges() {
    let bounds = ParameterBounds::recommended();
    let base = BenchmarkRequest::default();
    let within = |request: BenchmarkRequest| request.check_bounds(&bounds).is_ok();

    assert!(within(base.clone().with_bcrypt_cost(4)));
    assert!(!within(base.clone().with_bcrypt_cost(16)));
    assert!(within(base.clone().with_argon_memory_kib(8192)));
    assert!(!within(base.clone().with_argon_memory_kib(8191)));
    assert!(!within(base.clone().with_argon_memory_kib(65537)));
    assert!(!within(base.clone().with_argon_time_cost(6)));
    assert!(!within(base.with_argon_parallelism(0)));
}
