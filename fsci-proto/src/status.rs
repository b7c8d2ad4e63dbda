//! MAC status codes carried in confirm payloads.

/// IEEE 802.15.4 MAC enumeration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Success,
    BeaconLoss,
    ChannelAccessFailure,
    Denied,
    DisableTrxFailure,
    FrameTooLong,
    InvalidGts,
    InvalidHandle,
    InvalidParameter,
    NoAck,
    NoBeacon,
    NoData,
    NoShortAddress,
    TransactionExpired,
    TransactionOverflow,
    TxActive,
    UnsupportedAttribute,
    InvalidAddress,
    ReadOnly,
    /// Any code not listed above.
    Other(u8),
}

impl Status {
    #[must_use]
    pub const fn from_u8(code: u8) -> Self {
        match code {
            0x00 => Self::Success,
            0xE0 => Self::BeaconLoss,
            0xE1 => Self::ChannelAccessFailure,
            0xE2 => Self::Denied,
            0xE3 => Self::DisableTrxFailure,
            0xE5 => Self::FrameTooLong,
            0xE6 => Self::InvalidGts,
            0xE7 => Self::InvalidHandle,
            0xE8 => Self::InvalidParameter,
            0xE9 => Self::NoAck,
            0xEA => Self::NoBeacon,
            0xEB => Self::NoData,
            0xEC => Self::NoShortAddress,
            0xF0 => Self::TransactionExpired,
            0xF1 => Self::TransactionOverflow,
            0xF2 => Self::TxActive,
            0xF4 => Self::UnsupportedAttribute,
            0xF5 => Self::InvalidAddress,
            0xFB => Self::ReadOnly,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Success => 0x00,
            Self::BeaconLoss => 0xE0,
            Self::ChannelAccessFailure => 0xE1,
            Self::Denied => 0xE2,
            Self::DisableTrxFailure => 0xE3,
            Self::FrameTooLong => 0xE5,
            Self::InvalidGts => 0xE6,
            Self::InvalidHandle => 0xE7,
            Self::InvalidParameter => 0xE8,
            Self::NoAck => 0xE9,
            Self::NoBeacon => 0xEA,
            Self::NoData => 0xEB,
            Self::NoShortAddress => 0xEC,
            Self::TransactionExpired => 0xF0,
            Self::TransactionOverflow => 0xF1,
            Self::TxActive => 0xF2,
            Self::UnsupportedAttribute => 0xF4,
            Self::InvalidAddress => 0xF5,
            Self::ReadOnly => 0xFB,
            Self::Other(code) => code,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        Self::from_u8(code)
    }
}
