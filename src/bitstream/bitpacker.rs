use crate::error::PackError;
use crate::prefix_coding::{Code, CodeTable};

/// Creates a bitstream for output. Bits are packed most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of valid bits in the final byte after flush() (0 means the last byte is full).
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
    /// Bits put on the stream so far, not counting flush padding.
    written: u64,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the capacity specified. Call flush() to
    /// flush the bit queue to the buffer before using the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
            written: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.written += 1;
        self.write_stream();
    }

    /// Puts every bit of a code on the stream, first bit first.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().for_each(|bit| self.out_bit(bit));
    }

    /// Puts an 8 bit word of pre-packed binary encoded data on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by bit length
        self.queue |= data as u64; //add data portion to queue
        self.q_bits += 8; //update depth of queue bits
        self.written += 8;
        self.write_stream();
    }

    /// Puts a 16 bit word of pre-packed binary encoded data on the stream.
    pub fn out16(&mut self, data: u16) {
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.written += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word of pre-packed binary encoded data on the stream.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.written += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream. The queue can't take 64 bits at once, so this is done as
    /// two 32 bit halves.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Puts a run of bytes on the stream.
    pub fn out_bytes(&mut self, data: &[u8]) {
        data.iter().for_each(|&byte| self.out8(byte));
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
        }
    }

    /// Count of bits put on the stream, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}

/// Packed codes for a whole input, with the exact number of meaningful bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub bits: u64,
}

/// Concatenate the code of every input byte, in input order, and pack the result. The final
/// byte is zero padded.
pub fn pack_codes(data: &[u8], table: &CodeTable) -> Result<Payload, PackError> {
    // Average code length is rarely above a byte, so data.len() is a reasonable first guess
    let mut bp = BitPacker::new(data.len());
    for &symbol in data {
        let code = table
            .get(symbol)
            .ok_or(PackError::SymbolNotInTable { symbol })?;
        bp.out_code(code);
    }
    bp.flush();
    Ok(Payload {
        bits: bp.bits_written(),
        bytes: bp.output,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out16_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00100001_00100000;
        bw.out16(data);
        bw.flush();
        let out = bw.output;
        assert_eq!(out, "! ".as_bytes());
    }

    #[test]
    fn out_bit_and_loc_test() {
        let mut bw = BitPacker::new(100);
        [true, false, true].iter().for_each(|&b| bw.out_bit(b));
        assert_eq!("[0.3]", &bw.loc());
        bw.flush();
        assert_eq!(bw.output, vec![0b1010_0000]);
        assert_eq!(bw.last_bits, 3);
        assert_eq!(bw.bits_written(), 3);
        assert_eq!("[1.0]", &bw.loc());
    }

    #[test]
    fn mixed_width_test() {
        let mut bw = BitPacker::new(100);
        bw.out_bit(true);
        bw.out8(0xff);
        bw.out16(0);
        bw.flush();
        assert_eq!(bw.output, vec![0xff, 0x80, 0x00, 0x00]);
        assert_eq!(bw.bits_written(), 25);
    }

    #[test]
    fn out64_test() {
        let mut bw = BitPacker::new(100);
        bw.out64(0x0102_0304_0506_0708);
        bw.flush();
        assert_eq!(bw.output, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(bw.last_bits, 0);
    }

    #[test]
    fn pack_codes_test() {
        let mut table = CodeTable::new();
        table.insert(b'a', Code::from_ascii(b"0").unwrap());
        table.insert(b'b', Code::from_ascii(b"10").unwrap());
        table.insert(b'c', Code::from_ascii(b"11").unwrap());
        // a b c c a b -> 0 10 11 11 0 10 -> 01011110 10(000000)
        let payload = pack_codes(b"abccab", &table).unwrap();
        assert_eq!(payload.bits, 10);
        assert_eq!(payload.bytes, vec![0b0101_1110, 0b1000_0000]);

        assert!(matches!(
            pack_codes(b"abz", &table),
            Err(PackError::SymbolNotInTable { symbol: b'z' })
        ));
    }
}
