//! BitReader: reads a packed bitstream, most significant bit of each byte first.
//!
//! Containers are always fully buffered before decoding, so the reader walks a borrowed byte slice
//! rather than pulling from an I/O source. Every read returns None once the data runs out, leaving
//! the caller to decide whether that is an error.
//!

const BIT_MASK: u8 = 0xff;

/// Reads bits and byte aligned fields from a buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return the next n bits (n <= 64) as a number, or None if there is not enough data. Nothing
    /// is consumed when the read fails.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        if n > 64 || self.remaining_bits() < n {
            return None;
        }
        let mut result = 0_u64;
        let mut n = n;
        // Byte aligned reads can take whole bytes at a time
        while self.bit_index == 0 && n >= 8 {
            result = result << 8 | self.buffer[self.cursor] as u64;
            self.cursor += 1;
            n -= 8;
        }
        for _ in 0..n {
            result = result << 1 | self.bit()? as u64;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Returns an Option<Vec<u8>> of n bytes, or None if fewer than n bytes remain.
    pub fn bytes(&mut self, n: usize) -> Option<Vec<u8>> {
        if self.remaining_bits() < n * 8 {
            return None;
        }
        (0..n).map(|_| self.byte()).collect()
    }

    /// Number of unread bits.
    pub fn remaining_bits(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 - self.bit_index
    }

    /// The unread bytes, when the reader sits on a byte boundary.
    pub fn rest(&self) -> Option<&'a [u8]> {
        if self.bit_index == 0 {
            Some(&self.buffer[self.cursor..])
        } else {
            None
        }
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
