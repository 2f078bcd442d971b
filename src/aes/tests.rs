use super::*;
use crate::error::OracleError;
use crate::keygen::{derive_iv, derive_key, AesKey, Iv};

fn key_from_hex(s: &str) -> AesKey {
    AesKey::from_slice(&hex::decode(s).unwrap()).unwrap()
}

fn iv_from_hex(s: &str) -> Iv {
    Iv::from_slice(&hex::decode(s).unwrap()).unwrap()
}

#[test]
fn test_encode_words_big_endian() {
    let encoded = encode_words(&[1, 2, 3, 4, 5, 6, 7, 8]);

    // Each integer becomes a high byte followed by a low byte
    assert_eq!(hex::encode(&encoded), "00010002000300040005000600070008");
    assert_eq!(encode_words(&[0xabcd]), vec![0xab, 0xcd]);
}

#[test]
fn test_decode_words_inverse() {
    let words = vec![0u16, 1, 255, 256, 0x7fff, 0x8000, 0xfffe, 0xffff];
    assert_eq!(decode_words(&encode_words(&words)).unwrap(), words);
}

#[test]
fn test_decode_words_odd_length() {
    let result = decode_words(&[0x00, 0x01, 0x02]);
    assert!(matches!(result, Err(OracleError::MalformedLength { .. })));
}

#[test]
fn test_ecb_fips197_vector() {
    // FIPS-197 Appendix C.1 (AES-128)
    let key = key_from_hex("000102030405060708090a0b0c0d0e0f");
    let plaintext = hex::decode("00112233445566778899aabbccddeeff").unwrap();

    let ciphertext = ecb_encrypt_block(&key, &plaintext).unwrap();
    assert_eq!(hex::encode(&ciphertext), "69c4e0d86a7b0430d8cdb78070b4c55a");

    let decrypted = ecb_decrypt_block(&key, &ciphertext).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_ecb_toy_dataset() {
    // Seed 42, dataset 1..=8
    let key = derive_key(42);
    let engine = AesEngine::new(&key, CipherMode::Ecb, None).unwrap();

    let ciphertext = engine.encrypt_words(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(hex::encode(&ciphertext), "6d1e36472131f8482ae9e2b6aa2e56bb");

    let decrypted = engine.decrypt_words(&ciphertext).unwrap();
    assert_eq!(decrypted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_ecb_rejects_other_lengths() {
    let key = derive_key(1);

    for len in [0usize, 15, 17, 32] {
        let data = vec![0u8; len];
        let result = ecb_encrypt_block(&key, &data);
        assert!(
            matches!(result, Err(OracleError::ModeLengthMismatch { .. })),
            "ECB accepted {} bytes",
            len
        );
        assert!(ecb_decrypt_block(&key, &data).is_err());
    }
}

#[test]
fn test_ctr_sp800_38a_vector() {
    // NIST SP 800-38A F.5.1 CTR-AES128.Encrypt
    let key = key_from_hex("2b7e151628aed2a6abf7158809cf4f3c");
    let iv = iv_from_hex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let plaintext = hex::decode(concat!(
        "6bc1bee22e409f96e93d7e117393172a",
        "ae2d8a571e03ac9c9eb76fac45af8e51",
        "30c81c46a35ce411e5fbc1191a0a52ef",
        "f69f2445df4f9b17ad2b417be66c3710",
    ))
    .unwrap();

    let ciphertext = ctr_apply(&key, &iv, &plaintext).unwrap();
    assert_eq!(
        hex::encode(&ciphertext),
        concat!(
            "874d6191b620e3261bef6864990db6ce",
            "9806f66b7970fdff8617187bb9fffdff",
            "5ae4df3edbd5d35e5b4f09020db03eab",
            "1e031dda2fbe03d1792170a0f3009cee",
        )
    );
    assert_eq!(ctr_apply(&key, &iv, &ciphertext).unwrap(), plaintext);
}

#[test]
fn test_ctr_keystream_increments_counter_per_block() {
    // Seed 7: block i is XORed with AES_K(IV + i)
    let key = derive_key(7);
    let iv = derive_iv(7);
    let zeros = vec![0u8; 2 * BLOCK_SIZE];

    let keystream = ctr_apply(&key, &iv, &zeros).unwrap();

    let block0 = ecb_encrypt_block(&key, iv.as_bytes()).unwrap();
    let next = Iv::from_counter(iv.as_counter().wrapping_add(1));
    let block1 = ecb_encrypt_block(&key, next.as_bytes()).unwrap();

    assert_eq!(&keystream[..BLOCK_SIZE], &block0[..]);
    assert_eq!(&keystream[BLOCK_SIZE..], &block1[..]);
}

#[test]
fn test_ctr_seed_7_dataset() {
    let key = derive_key(7);
    let iv = derive_iv(7);
    let engine = AesEngine::new(&key, CipherMode::Ctr, Some(&iv)).unwrap();
    let words: Vec<u16> = (1..=16).map(|i| i * 100).collect();

    let ciphertext = engine.encrypt_words(&words).unwrap();
    assert_eq!(
        hex::encode(&ciphertext),
        "b5f2ba48fb0850c2eb84bc2f48bf620a6cb83bee44ac8e040d968ea8f8baa043"
    );
    assert_eq!(engine.decrypt_words(&ciphertext).unwrap(), words);
}

#[test]
fn test_ctr_counter_wraps_modulo_2_128() {
    let key = derive_key(7);
    let iv = Iv::from_counter(u128::MAX);

    let keystream = ctr_apply(&key, &iv, &[0u8; 2 * BLOCK_SIZE]).unwrap();

    // The second block uses counter 0
    let wrapped = ecb_encrypt_block(&key, &[0u8; BLOCK_SIZE]).unwrap();
    assert_eq!(&keystream[BLOCK_SIZE..], &wrapped[..]);
    assert_eq!(
        hex::encode(&keystream[..BLOCK_SIZE]),
        "e1d6f1ef2dced49274dc5c7b67397793"
    );
}

#[test]
fn test_ctr_rejects_partial_blocks() {
    let key = derive_key(3);
    let iv = derive_iv(3);

    for len in [0usize, 1, 15, 17, 40] {
        let result = ctr_apply(&key, &iv, &vec![0u8; len]);
        assert!(
            matches!(result, Err(OracleError::MalformedLength { .. })),
            "CTR accepted {} bytes",
            len
        );
    }
}

#[test]
fn test_ctr_engine_requires_iv() {
    let key = derive_key(3);
    let result = AesEngine::new(&key, CipherMode::Ctr, None);

    let err = result.unwrap_err();
    assert!(err.is_missing_dependency());
}

#[test]
fn test_engine_debug_hides_key() {
    let key = derive_key(42);
    let engine = AesEngine::new(&key, CipherMode::Ecb, None).unwrap();

    let rendered = format!("{:?}", engine);
    assert!(rendered.contains("ECB") || rendered.contains("Ecb"));
    assert!(!rendered.contains("73475c"));
    assert_eq!(engine.mode(), CipherMode::Ecb);
}
