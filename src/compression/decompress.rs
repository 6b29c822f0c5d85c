use std::path::Path;

use log::{debug, info};

use super::container::Container;
use super::{read_input, write_output, Stats};
use crate::bitstream::bitreader::BitReader;
use crate::error::{Malformed, PackError};
use crate::prefix_coding::{Algorithm, Code};

/// Decompress a container, taking the algorithm from its magic tag.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, PackError> {
    let container = Container::parse(data)?;
    decode(&container)
}

/// Decompress a container that must have been written by the expected algorithm.
pub fn decompress_as(data: &[u8], expected: Algorithm) -> Result<Vec<u8>, PackError> {
    let container = Container::parse(data)?;
    if container.algorithm != expected {
        return Err(Malformed::AlgorithmMismatch {
            expected,
            found: container.algorithm,
        }
        .into());
    }
    decode(&container)
}

/// Walk the payload bit by bit, growing the current prefix until it matches a dictionary entry.
/// Stops once the original number of bytes has been produced; anything after that is padding.
pub fn decode(container: &Container<'_>) -> Result<Vec<u8>, PackError> {
    let expected = container.original_len;
    let max_len = container.table.max_len();
    // A damaged header could claim any length, so never reserve more than the payload can hold
    let capacity = expected.min(container.payload.len() as u64 * 8) as usize;
    let mut output = Vec::with_capacity(capacity);

    let mut br = BitReader::new(container.payload);
    let mut current = Code::new();
    while (output.len() as u64) < expected {
        let bit = br.bool_bit().ok_or(Malformed::TruncatedPayload {
            decoded: output.len() as u64,
            expected,
        })?;
        current.push(bit);
        if let Some(&symbol) = container.inverse.get(&current) {
            output.push(symbol);
            current.clear();
        } else if current.len() >= max_len {
            return Err(Malformed::UndecodablePayload {
                decoded: output.len() as u64,
            }
            .into());
        }
    }
    debug!(
        "Decoded {} bytes, {} padding bits left over",
        output.len(),
        br.remaining_bits()
    );
    Ok(output)
}

/// Decompress the input file into the output file. When an algorithm is given, the container must
/// carry its magic tag. The output is only created once decoding has succeeded.
pub fn decompress_file(
    input: &Path,
    output: &Path,
    expected: Option<Algorithm>,
) -> Result<Stats, PackError> {
    let data = read_input(input)?;
    let decoded = match expected {
        Some(algorithm) => decompress_as(&data, algorithm)?,
        None => decompress(&data)?,
    };
    write_output(output, &decoded)?;
    info!("Wrote {}", output.display());
    Ok(Stats {
        input_size: data.len() as u64,
        output_size: decoded.len() as u64,
    })
}
