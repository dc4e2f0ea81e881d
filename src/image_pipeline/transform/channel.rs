//! Fixed mapping between pixel channels and grid columns.
//!
//! Pixel `x` occupies grid columns `3x`, `3x + 1` and `3x + 2`, holding its red,
//! green and blue intensities in that order. Gradient coloring depends on this order.

/// Number of grid columns each pixel occupies.
pub const CHANNELS_PER_PIXEL: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> u32 {
        self as u32
    }

    /// Channel stored at `offset` modulo 3 within a pixel's columns.
    pub fn from_column_offset(offset: u32) -> Channel {
        match offset % CHANNELS_PER_PIXEL {
            0 => Channel::Red,
            1 => Channel::Green,
            2 => Channel::Blue,
            _ => unreachable!("remainder of division by 3"),
        }
    }

    /// Pure color of the channel as 0xRRGGBB.
    pub fn color(self) -> u32 {
        match self {
            Channel::Red => 0xFF0000,
            Channel::Green => 0x00FF00,
            Channel::Blue => 0x0000FF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Pixel column and channel stored in 0-based grid column `column`.
pub fn pixel_of_column(column: u32) -> (u32, Channel) {
    (
        column / CHANNELS_PER_PIXEL,
        Channel::from_column_offset(column),
    )
}

/// 0-based grid column holding `channel` of pixel column `pixel_x`.
pub fn column_of(pixel_x: u32, channel: Channel) -> u32 {
    pixel_x * CHANNELS_PER_PIXEL + channel.index()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channel_order_is_fixed() {
        assert_eq!(column_of(0, Channel::Red), 0);
        assert_eq!(column_of(0, Channel::Green), 1);
        assert_eq!(column_of(0, Channel::Blue), 2);
        assert_eq!(column_of(4, Channel::Green), 13);
        assert_eq!(pixel_of_column(13), (4, Channel::Green));
        assert_eq!(Channel::ALL.map(Channel::color), [0xFF0000, 0x00FF00, 0x0000FF]);
    }

    proptest! {
        #[test]
        fn prop_column_mapping_round_trips(column in 0u32..(u32::MAX - 3)) {
            let (pixel_x, channel) = pixel_of_column(column);
            prop_assert_eq!(column_of(pixel_x, channel), column);
        }
    }
}
