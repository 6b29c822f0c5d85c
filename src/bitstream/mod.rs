//! The bitstream module forms the I/O subsystem for prefixzip.
//!
//! Codes are variable length, so the compressed payload is a continuous run of bits rather than
//! bytes. BitPacker queues bits and emits them as bytes, most significant bit first, zero padding
//! the final byte. BitReader walks a buffer the same way, bit by bit or in whole fields.
//!
//! Container header fields are byte aligned and go through the same packer and reader, so both
//! directions share one notion of bit order.
//!
pub mod bitpacker;
pub mod bitreader;
