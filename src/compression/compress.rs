use std::path::Path;

use log::{debug, info};

use super::container::write_container;
use super::{read_input, write_output, Stats};
use crate::bitstream::bitpacker::pack_codes;
use crate::error::PackError;
use crate::prefix_coding::Algorithm;
use crate::tools::freq_count::alphabet;

/// Compress a buffer into a self describing container.
pub fn compress(data: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, PackError> {
    let symbols = alphabet(data)?;
    info!(
        "Compressing {} bytes ({} distinct) with {}",
        data.len(),
        symbols.len(),
        algorithm
    );

    let table = algorithm.build_table(&symbols);
    debug!("Longest code is {} bits", table.max_len());

    let payload = pack_codes(data, &table)?;
    Ok(write_container(
        algorithm,
        data.len() as u64,
        &table,
        &payload,
    ))
}

/// Compress the input file into the output file. The output is only created once compression has
/// succeeded.
pub fn compress_file(
    input: &Path,
    output: &Path,
    algorithm: Algorithm,
) -> Result<Stats, PackError> {
    let data = read_input(input)?;
    let container = compress(&data, algorithm)?;
    write_output(output, &container)?;
    info!("Wrote {}", output.display());
    Ok(Stats {
        input_size: data.len() as u64,
        output_size: container.len() as u64,
    })
}
