//! Conversion between MAC frames and MCPS data primitives.

use fsci_proto::{
    DataIndication, DataRequest, FrameControl, FrameError, FrameType, LinkFrame, TxOptions,
    BROADCAST_PAN_ID,
};

use crate::error::Error;

/// Build an MCPS-DATA.request carrying `frame`.
///
/// Only unsecured data frames are accepted. The request borrows its MSDU from
/// `frame`.
pub fn data_request_from_frame(frame: &[u8], msdu_handle: u8) -> Result<DataRequest<'_>, Error> {
    let frame_control = FrameControl::peek(frame).map_err(|_| {
        warn!("frame too short for frame control");
        Error::InvalidParameter
    })?;
    if frame_control.frame_type != FrameType::Data {
        warn!("cannot send frame type {:?}", frame_control.frame_type);
        return Err(Error::InvalidParameter);
    }
    if frame_control.security_enabled {
        warn!("security-enabled frames are not supported");
        return Err(Error::InvalidParameter);
    }

    let link = LinkFrame::parse(frame).map_err(|e| {
        warn!("malformed MAC header: {:?}", e);
        Error::InvalidParameter
    })?;

    let mut tx_options = TxOptions::NONE;
    if frame_control.ack_request {
        tx_options |= TxOptions::ACK;
    }
    if frame_control.frame_pending {
        tx_options |= TxOptions::FRAME_PENDING;
    }

    let dst_pan_id = link.dst_pan_id.unwrap_or(BROADCAST_PAN_ID);
    Ok(DataRequest {
        dst_addr: link.dst_addr,
        dst_pan_id,
        src_addr: link.src_addr,
        src_pan_id: link.src_pan_id.unwrap_or(dst_pan_id),
        msdu_handle,
        tx_options,
        msdu: link.payload,
    })
}

/// Rebuild the MAC frame of a data indication into `buf`.
///
/// The frame control is always data, version 2006, PAN ID compressed, so the
/// source PAN is not emitted. Returns the frame length.
pub fn frame_from_indication(
    indication: &DataIndication<'_>,
    buf: &mut [u8],
) -> Result<usize, FrameError> {
    LinkFrame {
        frame_control: FrameControl::data(),
        sequence: indication.dsn,
        dst_pan_id: Some(indication.dst_pan_id),
        dst_addr: indication.dst_addr,
        src_pan_id: Some(indication.src_pan_id),
        src_addr: indication.src_addr,
        payload: indication.msdu,
    }
    .write(buf)
}
