//! Word encoding.
//!
//! `readmemh` reads each line as one number, most significant digit first, so every
//! little-endian word of the binary is written with its bytes reversed:
//! `11 22 33 44` becomes `44332211`.

/// Bytes per memory word.
pub const WORD_BYTES: u64 = 4;

/// A word covering an address range no section occupies.
pub const FILLER: &str = "00000000";

/// Encodes `bytes` as one line per word. A short final group is zero-padded.
pub fn encode_words(bytes: &[u8]) -> Vec<String> {
    bytes.chunks(WORD_BYTES as usize).map(encode_word).collect()
}

/// Encodes at most four bytes as an 8-digit word in loader digit order.
pub fn encode_word(bytes: &[u8]) -> String {
    debug_assert!(bytes.len() <= WORD_BYTES as usize);
    let mut word = [0u8; WORD_BYTES as usize];
    word[..bytes.len()].copy_from_slice(bytes);
    word.reverse();
    hex::encode(word)
}

/// Recovers the four source bytes of an encoded word.
pub fn decode_word(word: &str) -> Result<[u8; 4], hex::FromHexError> {
    let mut bytes = [0u8; WORD_BYTES as usize];
    hex::decode_to_slice(word, &mut bytes)?;
    bytes.reverse();
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_bytes_within_each_word() {
        assert_eq!(
            encode_words(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]),
            vec!["44332211", "88776655"]
        );
        assert_eq!(encode_word(&[0xaa, 0xbb, 0xcc, 0xdd]), "ddccbbaa");
    }

    #[test]
    fn pads_short_tail_with_zero_digits() {
        assert_eq!(encode_words(&[0x01, 0x02, 0x03, 0x04, 0x05]), vec!["04030201", "00000005"]);
        assert_eq!(encode_words(&[0xab, 0xcd]), vec!["0000cdab"]);
        assert_eq!(encode_words(&[0xab, 0xcd, 0xef]), vec!["00efcdab"]);
    }

    #[test]
    fn empty_input_has_no_words() {
        assert!(encode_words(&[]).is_empty());
    }

    #[test]
    fn decode_inverts_encode() {
        for word in [[0u8; 4], [0xff; 4], [0x13, 0x05, 0x10, 0x00], [0xde, 0xad, 0xbe, 0xef]] {
            assert_eq!(decode_word(&encode_word(&word)).unwrap(), word);
        }
        assert!(decode_word("0000zz00").is_err());
        assert!(decode_word("123").is_err());
    }

    #[test]
    fn filler_is_a_zero_word() {
        assert_eq!(encode_word(&[0; 4]), FILLER);
    }
}
