use crate::error::PackError;
use crate::prefix_coding::Symbol;

/// Returns a frequency count of the input data, indexed by byte value.
pub fn freqs(data: &[u8]) -> [u64; 256] {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Returns one Symbol per distinct byte in the data, in ascending byte order.
pub fn alphabet(data: &[u8]) -> Result<Vec<Symbol>, PackError> {
    if data.is_empty() {
        return Err(PackError::EmptyInput);
    }
    Ok(freqs(data)
        .iter()
        .enumerate()
        .filter(|&(_, &freq)| freq > 0)
        .map(|(value, &freq)| Symbol {
            value: value as u8,
            freq,
        })
        .collect())
}
