//! ITCH Add Order message implementation
//!
//! Add Order messages (`A`, and `F` with market participant attribution) put a
//! new order on the book. They are the only source of the security and price an
//! `E` execution refers to.

use crate::common::{check_body, message_sizes, message_type, ItchError, Price, Side};
use crate::header::MessageHeader;
use crate::ticker::Ticker;
use crate::utils::{read_u32, read_u64};

/// New order (36 bytes, 40 with attribution)
///
/// | Field       | Offset | Size | Type     | Description                    |
/// |-------------|--------|------|----------|--------------------------------|
/// | Header      | 0      | 11   | header   | Tag 'A' or 'F'                 |
/// | Reference   | 11     | 8    | `u64`    | Order reference number         |
/// | Side        | 19     | 1    | `Side`   | 'B' or 'S'                     |
/// | Shares      | 20     | 4    | `u32`    | Displayed shares               |
/// | Stock       | 24     | 8    | `Ticker` | Space-padded symbol            |
/// | Price       | 32     | 4    | `Price`  | Limit price, 4 implied decimals |
/// | Attribution | 36     | 4    | `[u8;4]` | MPID, 'F' only                 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOrder {
    pub header: MessageHeader,
    pub reference: u64,
    pub side: Side,
    pub shares: u32,
    pub stock: Ticker,
    pub price: Price,
    pub attribution: Option<[u8; 4]>,
}

impl AddOrder {
    /// Create an 'A' message.
    pub fn new(
        timestamp: u64,
        reference: u64,
        side: Side,
        shares: u32,
        stock: Ticker,
        price: Price,
    ) -> Self {
        Self {
            header: MessageHeader::new(message_type::ADD_ORDER, timestamp),
            reference,
            side,
            shares,
            stock,
            price,
            attribution: None,
        }
    }

    /// Turn this into an 'F' message attributed to `mpid`.
    pub fn with_attribution(mut self, mpid: [u8; 4]) -> Self {
        self.header.message_type = message_type::ADD_ORDER_MPID;
        self.attribution = Some(mpid);
        self
    }

    /// Wire size of this message.
    pub fn size(&self) -> usize {
        match self.attribution {
            Some(_) => message_sizes::ADD_ORDER_MPID,
            None => message_sizes::ADD_ORDER,
        }
    }

    /// Pack into the wire layout ('A' or 'F' depending on attribution).
    pub fn pack(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.size()];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.reference.to_be_bytes());
        out[19] = self.side as u8;
        out[20..24].copy_from_slice(&self.shares.to_be_bytes());
        out[24..32].copy_from_slice(self.stock.as_bytes());
        out[32..36].copy_from_slice(&self.price.raw().to_be_bytes());
        if let Some(mpid) = self.attribution {
            out[36..40].copy_from_slice(&mpid);
        }
        out
    }

    /// Unpack an 'A' or 'F' message body.
    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        let tag = bytes.first().copied().unwrap_or_default();
        let attributed = tag == message_type::ADD_ORDER_MPID;
        if attributed {
            check_body(bytes, message_type::ADD_ORDER_MPID, message_sizes::ADD_ORDER_MPID)?;
        } else {
            check_body(bytes, message_type::ADD_ORDER, message_sizes::ADD_ORDER)?;
        }

        let attribution = if attributed {
            let mut mpid = [0u8; 4];
            mpid.copy_from_slice(&bytes[36..40]);
            Some(mpid)
        } else {
            None
        };

        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            reference: read_u64(bytes, 11),
            side: Side::try_from(bytes[19])?,
            shares: read_u32(bytes, 20),
            stock: Ticker::read(bytes, 24)?,
            price: Price(read_u32(bytes, 32)),
            attribution,
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}
