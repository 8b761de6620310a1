use crate::error::{ErrorKind, Result};
use aes::Aes128;
use aes::cipher::{BlockEncryptMut, KeyInit, block_padding::NoPadding};

type Aes128EcbEnc = ecb::Encryptor<Aes128>;

const BLOCK_SIZE: usize = 16;

/// Pads `data` to the next 16-byte boundary, PKCS#7 style.
///
/// Input that is already aligned gains a whole block of `0x10`.
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let padding = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + padding);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding, padding as u8);
    padded
}

/// Encrypts password using AES-128-ECB with PKCS7 padding, base64 encoded
pub fn encrypt_password(password: &str, aes_key: &[u8]) -> Result<String> {
    let cipher = Aes128EcbEnc::new_from_slice(aes_key).map_err(|_| {
        ErrorKind::InvalidKey(format!("expected 16 bytes, got {}", aes_key.len()))
    })?;

    // Padding is applied by hand so the byte layout is the one the portal expects.
    let padded = pkcs7_pad(password.as_bytes());
    let ct = cipher.encrypt_padded_vec_mut::<NoPadding>(&padded);

    let base64 = base64_simd::STANDARD;
    Ok(base64.encode_to_string(ct))
}

/// Decodes base64 captcha image, with or without a `data:` URL prefix
pub fn decode_captcha_image(captcha_b64: &str) -> Result<Vec<u8>> {
    let payload = match captcha_b64.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => captcha_b64,
    };
    let base64 = base64_simd::STANDARD;
    Ok(base64.decode_to_vec(payload.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0725@pwdorgopenp";

    #[test]
    fn aligned_input_gains_a_full_block() {
        let padded = pkcs7_pad(b"0123456789abcdef");
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 0x10));
    }

    #[test]
    fn unaligned_input_pads_to_boundary() {
        let padded = pkcs7_pad(b"222222222");
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..9], b"222222222");
        assert!(padded[9..].iter().all(|&b| b == 7));
    }

    #[test]
    fn padding_counts_utf8_bytes() {
        // 5 chars, 15 bytes
        let padded = pkcs7_pad("密码密码密".as_bytes());
        assert_eq!(padded.len(), 16);
        assert_eq!(padded[15], 1);
    }

    #[test]
    fn empty_input_is_one_block_of_padding() {
        assert_eq!(pkcs7_pad(b""), vec![0x10; 16]);
    }

    #[test]
    fn encrypts_known_passwords() {
        assert_eq!(
            encrypt_password("222222222", KEY).unwrap(),
            "kEB2QeeYNpVxkVleTrqb5Q=="
        );
        assert_eq!(
            encrypt_password("0123456789abcdef", KEY).unwrap(),
            "F8bDcGmfaQNrAft96E1oqgcTwsT2Yk6+ozotwMb//Qo="
        );
    }

    #[test]
    fn rejects_short_key() {
        let err = encrypt_password("pwd", b"short").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidKey(_)));
    }

    #[test]
    fn decodes_plain_and_prefixed_captcha() {
        let plain = decode_captcha_image("aGVsbG8=").unwrap();
        let prefixed = decode_captcha_image("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(plain, b"hello");
        assert_eq!(prefixed, b"hello");
    }
}
