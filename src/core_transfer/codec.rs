//! Line-ending translation between the wire and the local filesystem.
//!
//! FTP ASCII mode carries CRLF line endings on the wire while files are
//! stored with bare LF. Downloads are encoded (LF becomes CRLF), uploads
//! are decoded (every CR is dropped). Binary mode touches nothing.

/// Transfer type negotiated with the TYPE command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Ascii,
    Binary,
}

/// Outbound translator for one transfer.
///
/// Transfers are streamed in fixed-size chunks, so a CRLF pair can be split
/// across two reads. The encoder remembers whether the last byte it saw was
/// a CR and never inserts a second one in front of the LF that follows.
#[derive(Debug)]
pub struct Encoder {
    transfer_type: TransferType,
    prev_was_cr: bool,
}

impl Encoder {
    pub fn new(transfer_type: TransferType) -> Self {
        Self {
            transfer_type,
            prev_was_cr: false,
        }
    }

    /// Translates one chunk of outbound bytes, appending to `out`.
    pub fn encode_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) {
        match self.transfer_type {
            TransferType::Binary => out.extend_from_slice(input),
            TransferType::Ascii => {
                for &byte in input {
                    if byte == b'\n' && !self.prev_was_cr {
                        out.push(b'\r');
                    }
                    out.push(byte);
                    self.prev_was_cr = byte == b'\r';
                }
            }
        }
    }
}

/// Translates one chunk of inbound bytes, appending to `out`.
///
/// Decoding is stateless: ASCII mode drops every CR, so a split CRLF needs
/// no carry between chunks.
pub fn decode_chunk(transfer_type: TransferType, input: &[u8], out: &mut Vec<u8>) {
    match transfer_type {
        TransferType::Binary => out.extend_from_slice(input),
        TransferType::Ascii => out.extend(input.iter().copied().filter(|&byte| byte != b'\r')),
    }
}
