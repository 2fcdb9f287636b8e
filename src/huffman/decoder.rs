use crate::bitstreams::BitReader;
use crate::error::HuffmanError;

use super::{build_tree, FrequencyTable, TreeNode, K_MAGIC, K_MAX_PADDING_BITS, K_NUM_SYMBOLS};

/// Decompresses a container produced by [`compress`], rebuilding the code
/// tree from the stored frequencies with the same deterministic algorithm
/// the encoder used.
///
/// Decoding is all-or-nothing: any error means no output bytes are valid.
/// The authoritative stop condition is the frequency-table total, not the
/// end of the bit stream.
///
/// [`compress`]: super::encoder::compress
pub fn decompress(container: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    let (freqs, total, padding, payload) = parse_header(container)?;

    if freqs.is_empty() {
        if !payload.is_empty() {
            return Err(HuffmanError::EmptyAlphabetMismatch);
        }
        if padding != 0 {
            return Err(HuffmanError::CorruptStream("nonzero padding on an empty payload"));
        }
        return Ok(Vec::new());
    }

    if payload.is_empty() {
        return Err(HuffmanError::EmptyAlphabetMismatch);
    }
    if padding > K_MAX_PADDING_BITS {
        return Err(HuffmanError::CorruptStream("padding count outside 0..=7"));
    }

    let valid_bits = payload.len() * 8 - padding as usize;

    if freqs.distinct_symbols() == 1 {
        let (symbol, count) = freqs.entries().next().unwrap();

        // One bit was written per occurrence; no tree walk involved.
        if (valid_bits as u64) < count {
            return Err(HuffmanError::CorruptStream(
                "payload exhausted before the expected symbol count",
            ));
        }
        return Ok(vec![symbol; count as usize]);
    }

    // Every code is at least one bit long.
    if total > valid_bits as u64 {
        return Err(HuffmanError::CorruptStream(
            "payload exhausted before the expected symbol count",
        ));
    }

    let root = build_tree(&freqs).ok_or(HuffmanError::InternalInvariantViolation(
        "no tree for a non-empty frequency table",
    ))?;

    let mut reader = BitReader::new(payload.to_vec().into_boxed_slice(), valid_bits);
    let mut output = Vec::with_capacity(total as usize);

    while (output.len() as u64) < total {
        let mut node = &root;

        loop {
            let bit = reader.read_bit().map_err(|_| {
                HuffmanError::CorruptStream("payload exhausted before the expected symbol count")
            })?;

            node = match node {
                TreeNode::Internal { left, right, .. } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                TreeNode::Leaf { .. } => {
                    return Err(HuffmanError::InternalInvariantViolation(
                        "walk descended past a leaf",
                    ))
                }
            };

            if let TreeNode::Leaf { symbol, .. } = node {
                output.push(*symbol);
                break;
            }
        }
    }

    Ok(output)
}

fn parse_header(container: &[u8]) -> Result<(FrequencyTable, u64, u8, &[u8]), HuffmanError> {
    let fixed_len = K_MAGIC.len() + 2;

    if container.len() < fixed_len {
        return Err(HuffmanError::CorruptHeader("container shorter than the fixed header"));
    }
    if container[..K_MAGIC.len()] != K_MAGIC {
        return Err(HuffmanError::CorruptHeader("bad magic marker"));
    }

    let num_entries = u16::from_be_bytes([container[4], container[5]]) as usize;
    if num_entries > K_NUM_SYMBOLS {
        return Err(HuffmanError::CorruptHeader("more entries than symbols"));
    }

    let entries_end = fixed_len + num_entries * 5;
    if container.len() < entries_end + 1 {
        return Err(HuffmanError::CorruptHeader("truncated frequency table"));
    }

    let mut freqs = FrequencyTable::new();
    let mut total = 0u64;
    let mut previous_symbol = -1i32;

    for entry in container[fixed_len..entries_end].chunks_exact(5) {
        let symbol = entry[0];
        let count = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);

        if (symbol as i32) <= previous_symbol {
            return Err(HuffmanError::CorruptHeader("symbols not strictly ascending"));
        }
        if count == 0 {
            return Err(HuffmanError::CorruptHeader("zero frequency entry"));
        }

        total = total
            .checked_add(count as u64)
            .ok_or(HuffmanError::CorruptHeader("frequency sum overflow"))?;

        freqs.set_count(symbol, count as u64);
        previous_symbol = symbol as i32;
    }

    let padding = container[entries_end];
    let payload = &container[entries_end + 1..];

    Ok((freqs, total, padding, payload))
}
