// tests/key_material_tests.rs
use encrypted_data_toolkit::consts::MIN_KDF_ITERATIONS;
use encrypted_data_toolkit::core::key_material::{
    derive_key, generate_iv, generate_key, generate_salt, random_bytes, KdfParams,
};
use encrypted_data_toolkit::{from_hex, HashAlgorithm, KeySize, ToolkitError};

mod common;

const PASSWORD: &str = "correct horse battery staple";

fn fixed_salt() -> Vec<u8> {
    (0u8..16).collect()
}

#[test]
fn test_random_bytes_has_requested_length_and_varies() {
    common::setup();
    let a = random_bytes(32).unwrap();
    let b = random_bytes(32).unwrap();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);
    assert!(random_bytes(0).unwrap().is_empty());
}

#[test]
fn test_random_bytes_large_request_has_exact_length() {
    let bytes = random_bytes(3 * 1024 * 1024 + 7).unwrap();
    assert_eq!(bytes.len(), 3 * 1024 * 1024 + 7);
    assert!(bytes.iter().any(|&b| b != 0));
}

#[test]
fn test_generate_iv_and_salt_and_key() {
    assert_ne!(generate_iv(), generate_iv());
    assert_eq!(generate_salt(16).unwrap().len(), 16);
    assert!(matches!(
        generate_salt(0),
        Err(ToolkitError::InvalidArgument(_))
    ));

    let k1 = generate_key(KeySize::Aes192);
    let k2 = generate_key(KeySize::Aes192);
    assert_eq!(k1.expose_secret().len(), 24);
    assert_ne!(k1.expose_secret(), k2.expose_secret());
}

#[test]
fn test_derive_key_golden_sha256_100k() {
    common::setup();
    let key = derive_key(PASSWORD, &fixed_salt(), 32, 100_000, HashAlgorithm::Sha256).unwrap();
    let expected =
        hex::decode("49d49c25f597846209f0d92e7770ab64e1c75e94b4ce6c509265ee67175d2a1e").unwrap();
    assert_eq!(key.expose_secret().as_slice(), expected.as_slice());
}

#[test]
fn test_derive_key_golden_legacy_sha1_and_sha512() {
    let sha1 = derive_key("password", b"saltsalt", 16, 1000, HashAlgorithm::Sha1Legacy).unwrap();
    assert_eq!(
        sha1.expose_secret().as_slice(),
        from_hex("E9-FE-BF-F5-4B-FC-E6-68-FD-E3-01-AC-C8-55-63-CC")
            .unwrap()
            .as_slice()
    );

    let sha512 = derive_key("password", b"saltsalt", 64, 1000, HashAlgorithm::Sha512).unwrap();
    assert_eq!(
        hex::encode(sha512.expose_secret()),
        "43abf8c7027c6bd9d63e9d81784a006188474a8db14663d60114f5eef4e94b1b\
         76aba88da7b04ea335b9e7baaa6bde5e36350ee202acd02caf25b6061a4bb5b4"
    );
}

#[test]
fn test_derive_key_is_deterministic_and_sensitive_to_every_argument() {
    let salt = fixed_salt();
    let base = || derive_key("pw", &salt, 32, 1000, HashAlgorithm::Sha256).unwrap();
    let a = base();
    let b = base();
    assert_eq!(a.expose_secret(), b.expose_secret());

    let other_pw = derive_key("pw2", &salt, 32, 1000, HashAlgorithm::Sha256).unwrap();
    let other_salt = derive_key("pw", b"another salt", 32, 1000, HashAlgorithm::Sha256).unwrap();
    let other_iters = derive_key("pw", &salt, 32, 1001, HashAlgorithm::Sha256).unwrap();
    let other_hash = derive_key("pw", &salt, 32, 1000, HashAlgorithm::Sha512).unwrap();
    let shorter = derive_key("pw", &salt, 16, 1000, HashAlgorithm::Sha256).unwrap();

    for other in [&other_pw, &other_salt, &other_iters, &other_hash] {
        assert_ne!(a.expose_secret(), other.expose_secret());
    }
    // PBKDF2 output is prefix-stable, so only the length differs
    assert_eq!(shorter.expose_secret().len(), 16);
    assert_eq!(&a.expose_secret()[..16], shorter.expose_secret().as_slice());
}

#[test]
fn test_derive_key_rejects_bad_arguments() {
    let salt = fixed_salt();
    let cases = [
        derive_key("pw", &[], 32, 1000, HashAlgorithm::Sha256),
        derive_key("pw", &salt, 0, 1000, HashAlgorithm::Sha256),
        derive_key("pw", &salt, 32, 0, HashAlgorithm::Sha256),
        derive_key("pw", &salt, 32, MIN_KDF_ITERATIONS - 1, HashAlgorithm::Sha256),
    ];
    for case in cases {
        assert!(matches!(case, Err(ToolkitError::InvalidArgument(_))));
    }
}

#[test]
fn test_derive_key_long_output() {
    let salt = fixed_salt();
    let long = derive_key("pw", &salt, 2048, 1000, HashAlgorithm::Sha256).unwrap();
    let short = derive_key("pw", &salt, 32, 1000, HashAlgorithm::Sha256).unwrap();
    assert_eq!(long.expose_secret().len(), 2048);
    assert_eq!(&long.expose_secret()[..32], &short.expose_secret()[..]);
}

#[test]
fn test_kdf_params_validate() {
    KdfParams::default().validate().unwrap();
    KdfParams::legacy(24).validate().unwrap();

    let bad_len = KdfParams {
        key_len: 20,
        ..KdfParams::default()
    };
    let bad_iters = KdfParams {
        iterations: 999,
        ..KdfParams::default()
    };
    for params in [bad_len, bad_iters] {
        assert!(matches!(
            params.validate(),
            Err(ToolkitError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_kdf_params_legacy_matches_rfc2898_defaults() {
    let params = KdfParams::legacy(16);
    assert_eq!(params.hash, HashAlgorithm::Sha1Legacy);
    assert_eq!(params.iterations, 1000);

    let key = params.derive("password", b"saltsalt").unwrap();
    assert_eq!(
        hex::encode(key.expose_secret()),
        "e9febff54bfce668fde301acc85563cc"
    );
}
