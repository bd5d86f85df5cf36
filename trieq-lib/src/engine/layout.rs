//! Channel layout negotiation: the equalizer runs mono or stereo, with the
//! same channel set on input and output.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn from_channel_count(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }

    pub fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// True when the engine can run with the given input/output channel counts.
pub fn is_layout_supported(input_channels: usize, output_channels: usize) -> bool {
    ChannelLayout::from_channel_count(output_channels).is_some()
        && input_channels == output_channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_and_stereo_only() {
        assert!(is_layout_supported(1, 1));
        assert!(is_layout_supported(2, 2));
        assert!(!is_layout_supported(1, 2));
        assert!(!is_layout_supported(2, 1));
        assert!(!is_layout_supported(0, 0));
        assert!(!is_layout_supported(6, 6));
    }

    #[test]
    fn channel_counts_round_trip() {
        for layout in [ChannelLayout::Mono, ChannelLayout::Stereo] {
            assert_eq!(
                ChannelLayout::from_channel_count(layout.channel_count()),
                Some(layout)
            );
        }
    }
}
