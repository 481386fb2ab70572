//! The 76-byte device-metadata frame read off the video socket right after
//! the dummy byte.
use dab_wire::constants::{DEVICE_NAME_LEN, METADATA_FRAME_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetadata {
    pub device_name: String,
    pub codec_id: u32,
    pub width: u32,
    pub height: u32,
}

/// Parse exactly [`METADATA_FRAME_LEN`] bytes into [`DeviceMetadata`].
///
/// Panics if `frame` is shorter than the frame length; callers must have
/// already read the full frame (e.g. via `read_exact`).
pub fn parse_metadata_frame(frame: &[u8]) -> DeviceMetadata {
    assert!(frame.len() >= METADATA_FRAME_LEN, "short metadata frame");

    let name_bytes = &frame[0..DEVICE_NAME_LEN];
    let nul = name_bytes.iter().position(|&b| b == 0).unwrap_or(name_bytes.len());
    let device_name = String::from_utf8_lossy(&name_bytes[..nul]).into_owned();

    let codec_id = u32::from_be_bytes(frame[64..68].try_into().unwrap());
    let width = u32::from_be_bytes(frame[68..72].try_into().unwrap());
    let height = u32::from_be_bytes(frame[72..76].try_into().unwrap());

    DeviceMetadata {
        device_name,
        codec_id,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_codec_and_dimensions() {
        let mut frame = [0u8; METADATA_FRAME_LEN];
        frame[0..6].copy_from_slice(b"Pixel6");
        frame[64..68].copy_from_slice(&0x1234_5678_u32.to_be_bytes());
        frame[68..72].copy_from_slice(&1080_u32.to_be_bytes());
        frame[72..76].copy_from_slice(&2400_u32.to_be_bytes());

        let metadata = parse_metadata_frame(&frame);
        assert_eq!(metadata.device_name, "Pixel6");
        assert_eq!(metadata.codec_id, 0x1234_5678);
        assert_eq!(metadata.width, 1080);
        assert_eq!(metadata.height, 2400);
    }

    #[test]
    fn treats_overflow_bytes_past_76_as_the_caller_s_problem() {
        let mut frame = vec![0u8; METADATA_FRAME_LEN + 16];
        frame[68..72].copy_from_slice(&100_u32.to_be_bytes());
        frame[72..76].copy_from_slice(&200_u32.to_be_bytes());
        let metadata = parse_metadata_frame(&frame[..METADATA_FRAME_LEN]);
        assert_eq!(metadata.width, 100);
        assert_eq!(metadata.height, 200);
    }
}
