//! Digest computation for the hash command.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::ValueEnum;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashAlgorithm {
    #[value(name = "md5")]
    Md5,
    #[value(name = "sha1")]
    Sha1,
    #[value(name = "sha256")]
    Sha256,
    #[value(name = "sha512")]
    Sha512,
    #[value(name = "sha3-256")]
    Sha3_256,
    #[value(name = "sha3-512")]
    Sha3_512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DigestEncoding {
    Hex,
    Base64,
}

/// Digest `data` with `salt` appended after it, rendered per `encoding`.
pub fn digest(
    algorithm: HashAlgorithm,
    data: &[u8],
    salt: &[u8],
    encoding: DigestEncoding,
) -> String {
    let sum = match algorithm {
        HashAlgorithm::Md5 => digest_with::<Md5>(data, salt),
        HashAlgorithm::Sha1 => digest_with::<Sha1>(data, salt),
        HashAlgorithm::Sha256 => digest_with::<Sha256>(data, salt),
        HashAlgorithm::Sha512 => digest_with::<Sha512>(data, salt),
        HashAlgorithm::Sha3_256 => digest_with::<Sha3_256>(data, salt),
        HashAlgorithm::Sha3_512 => digest_with::<Sha3_512>(data, salt),
    };
    match encoding {
        DigestEncoding::Hex => hex::encode(&sum),
        DigestEncoding::Base64 => STANDARD.encode(&sum),
    }
}

fn digest_with<D: Digest>(data: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(data);
    hasher.update(salt);
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_digest(algorithm: HashAlgorithm, data: &[u8]) -> String {
        digest(algorithm, data, b"", DigestEncoding::Hex)
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Sha256, b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn md5_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Md5, b"hello"),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn sha1_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Sha1, b"hello"),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
    }

    #[test]
    fn sha512_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Sha512, b"hello"),
            "9b71d224bd62f3785d96d46ad3ea3d73319bfbc2890caadae2dff72519673ca72323c3d99ba5c11d7c7acc6e14b8c5da0c4663475c2e5c3adef46f73bcdec043"
        );
    }

    #[test]
    fn sha3_256_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Sha3_256, b"hello"),
            "3338be694f50c5f338814986cdf0686453a888b84f424d792af4b9202398f392"
        );
    }

    #[test]
    fn sha3_512_known_vector() {
        assert_eq!(
            hex_digest(HashAlgorithm::Sha3_512, b"hello"),
            "75d527c368f2efe848ecf6b073a36767800805e9eef2b1857d5f984f036eb6df891d75f72d9b154518c1cd58835286d1da9a38deba3de98b5a53e5ed78a84976"
        );
    }

    #[test]
    fn salt_appends_after_input() {
        assert_eq!(
            digest(HashAlgorithm::Sha256, b"hello", b"salt", DigestEncoding::Hex),
            hex_digest(HashAlgorithm::Sha256, b"hellosalt")
        );
        assert_eq!(
            digest(HashAlgorithm::Sha256, b"hello", b"salt", DigestEncoding::Hex),
            "87daba3fe263b34c335a0ee3b28ffec4d159aad6542502eaf551dc7b9128c267"
        );
    }

    #[test]
    fn base64_encoding_of_digest() {
        assert_eq!(
            digest(HashAlgorithm::Sha256, b"hello", b"", DigestEncoding::Base64),
            "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
        );
    }
}
