//! Ciphertext token framing shared by the built-in AEAD drivers.
//!
//! ```text
//! <base64(nonce)>.<base64(tag)>.<base64(ciphertext)>
//! ```
//!
//! Standard base64 alphabet with padding. The segment order is fixed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::EncryptorError;

/// Byte length of the nonce carried in every token (96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag carried in every token (128 bits).
pub const TAG_LEN: usize = 16;

/// Character joining the three token segments.
pub const SEPARATOR: char = '.';

/// A parsed ciphertext token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext body, without the tag.
    pub body: Vec<u8>,
}

impl Token {
    /// Encode this token to its canonical string representation.
    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            STANDARD.encode(self.nonce),
            STANDARD.encode(self.tag),
            STANDARD.encode(&self.body),
        )
    }

    /// Parse a token string.
    ///
    /// Only the first two separators split the token; anything after them
    /// belongs to the body segment and must itself be valid base64.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::MalformedCiphertext`] if the string does not
    /// have exactly three segments, a segment is not valid base64, or the
    /// nonce or tag has the wrong length.
    pub fn parse(s: &str) -> Result<Self, EncryptorError> {
        let segments: Vec<&str> = s.splitn(3, SEPARATOR).collect();
        let [nonce, tag, body] = segments.as_slice() else {
            return Err(EncryptorError::MalformedCiphertext(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        Ok(Self {
            nonce: decode_fixed(nonce, "nonce")?,
            tag: decode_fixed(tag, "tag")?,
            body: decode(body, "body")?,
        })
    }
}

fn decode(segment: &str, what: &str) -> Result<Vec<u8>, EncryptorError> {
    STANDARD
        .decode(segment)
        .map_err(|_| EncryptorError::MalformedCiphertext(format!("{what} is not valid base64")))
}

fn decode_fixed<const N: usize>(segment: &str, what: &str) -> Result<[u8; N], EncryptorError> {
    let bytes = decode(segment, what)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        EncryptorError::MalformedCiphertext(format!(
            "{what} must be {N} bytes, found {}",
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Token {
        Token {
            nonce: [7u8; NONCE_LEN],
            tag: [9u8; TAG_LEN],
            body: b"body".to_vec(),
        }
    }

    #[test]
    fn encodes_three_padded_segments() {
        let s = sample().encode();
        let segments: Vec<&str> = s.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], STANDARD.encode([7u8; NONCE_LEN]));
        assert_eq!(segments[1], STANDARD.encode([9u8; TAG_LEN]));
        assert_eq!(segments[2], "Ym9keQ==");
    }

    #[test]
    fn parse_reads_back_encoded_token() {
        let token = sample();
        assert_eq!(Token::parse(&token.encode()).unwrap(), token);
    }

    #[test]
    fn parse_accepts_empty_body() {
        let token = Token {
            body: Vec::new(),
            ..sample()
        };
        let s = token.encode();
        assert!(s.ends_with('.'));
        assert_eq!(Token::parse(&s).unwrap().body, Vec::<u8>::new());
    }

    #[test]
    fn rejects_too_few_segments() {
        let err = Token::parse("AAAA.BBBB").unwrap_err();
        assert!(matches!(err, EncryptorError::MalformedCiphertext(_)));
        assert!(err.to_string().contains("found 2"));
        assert!(Token::parse("").is_err());
    }

    #[test]
    fn extra_separator_lands_in_body() {
        let s = format!("{}.extra", sample().encode());
        assert!(matches!(
            Token::parse(&s),
            Err(EncryptorError::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn rejects_bad_base64() {
        let s = sample().encode();
        let broken = s.replacen(&STANDARD.encode([9u8; TAG_LEN]), "!!!!", 1);
        let err = Token::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("tag"));
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        let s = format!(
            "{}.{}.{}",
            STANDARD.encode([0u8; 8]),
            STANDARD.encode([0u8; TAG_LEN]),
            STANDARD.encode(b"x"),
        );
        let err = Token::parse(&s).unwrap_err();
        assert!(err.to_string().contains("nonce must be 12 bytes"));
    }

    #[test]
    fn rejects_unpadded_segments() {
        let s = format!(
            "{}.{}.Ym9keQ",
            STANDARD.encode([0u8; NONCE_LEN]),
            STANDARD.encode([0u8; TAG_LEN]),
        );
        assert!(Token::parse(&s).is_err());
    }
}
