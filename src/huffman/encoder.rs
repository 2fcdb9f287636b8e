use crate::bitstreams::BitWriter;
use crate::error::HuffmanError;

use super::{build_tree, CodeTable, FrequencyTable, K_MAGIC};

/// Compresses `input` into a self-describing container: magic marker,
/// frequency table, padding bit count, bit-packed payload.
///
/// Empty input produces a container with an empty frequency table and no
/// payload. Persistence is left to the caller.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    let freqs = FrequencyTable::from_bytes(input);

    let mut container = Vec::new();
    write_header(&freqs, &mut container)?;

    if freqs.is_empty() {
        container.push(0);
        return Ok(container);
    }

    let root = build_tree(&freqs).ok_or(HuffmanError::InternalInvariantViolation(
        "no tree for a non-empty frequency table",
    ))?;
    let codes = CodeTable::from_tree(&root)?;

    let mut writer = BitWriter::new();
    for &byte in input {
        match codes.code(byte) {
            Some(code) => writer.push_code(code),
            None => {
                return Err(HuffmanError::InternalInvariantViolation(
                    "input symbol missing from the code table",
                ))
            }
        }
    }

    let (payload, padding) = writer.build();
    container.push(padding);
    container.extend_from_slice(&payload);

    Ok(container)
}

/// Header layout: `HUFF`, entry count as 2 big-endian bytes, then one
/// (symbol, count) entry per present symbol in ascending symbol order, the
/// count as a 4-byte big-endian integer.
fn write_header(freqs: &FrequencyTable, out: &mut Vec<u8>) -> Result<(), HuffmanError> {
    out.extend_from_slice(&K_MAGIC);
    out.extend_from_slice(&(freqs.distinct_symbols() as u16).to_be_bytes());

    for (symbol, count) in freqs.entries() {
        if count > u32::MAX as u64 {
            return Err(HuffmanError::FrequencyOverflow { symbol, count });
        }

        out.push(symbol);
        out.extend_from_slice(&(count as u32).to_be_bytes());
    }

    Ok(())
}
