// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: colour channels, channel orders, upload formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChromaError;

/// One of the three colour channels of an RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel inside an interleaved RGB pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Single uppercase letter used in channel order strings.
    pub fn letter(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }

    /// Parse a channel letter. Case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'B' => Some(Self::Blue),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A permutation of the three colour channels.
///
/// Position `i` names the *source* channel that ends up in output slot `i`:
/// `BGR` means "output red slot takes the input blue channel", and so on.
/// Construction always validates, so every value is a true permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelOrder([Channel; 3]);

impl ChannelOrder {
    pub const IDENTITY: ChannelOrder =
        ChannelOrder([Channel::Red, Channel::Green, Channel::Blue]);

    /// Every permutation, identity first.
    pub const ALL: [ChannelOrder; 6] = [
        ChannelOrder([Channel::Red, Channel::Green, Channel::Blue]),
        ChannelOrder([Channel::Red, Channel::Blue, Channel::Green]),
        ChannelOrder([Channel::Green, Channel::Red, Channel::Blue]),
        ChannelOrder([Channel::Green, Channel::Blue, Channel::Red]),
        ChannelOrder([Channel::Blue, Channel::Red, Channel::Green]),
        ChannelOrder([Channel::Blue, Channel::Green, Channel::Red]),
    ];

    /// Build an order from three channels, rejecting duplicates.
    pub fn new(channels: [Channel; 3]) -> Result<Self, ChromaError> {
        let mut seen = [false; 3];
        for channel in channels {
            if std::mem::replace(&mut seen[channel.index()], true) {
                return Err(ChromaError::InvalidOrderSpec(
                    channels.iter().map(|c| c.letter()).collect(),
                ));
            }
        }
        Ok(Self(channels))
    }

    /// Parse a three-letter order such as `"BGR"` (case-insensitive).
    pub fn parse(spec: &str) -> Result<Self, ChromaError> {
        let invalid = || ChromaError::InvalidOrderSpec(spec.to_owned());

        let mut letters = spec.chars();
        let mut channels = [Channel::Red; 3];
        for slot in &mut channels {
            let letter = letters.next().ok_or_else(invalid)?;
            *slot = Channel::from_letter(letter).ok_or_else(invalid)?;
        }
        if letters.next().is_some() {
            return Err(invalid());
        }
        Self::new(channels).map_err(|_| invalid())
    }

    /// Build an order from source indices, e.g. `[2, 1, 0]` for `BGR`.
    pub fn from_indices(indices: [usize; 3]) -> Result<Self, ChromaError> {
        let invalid = || ChromaError::InvalidOrderSpec(format!("{indices:?}"));

        let mut channels = [Channel::Red; 3];
        for (slot, index) in channels.iter_mut().zip(indices) {
            *slot = Channel::from_index(index).ok_or_else(invalid)?;
        }
        Self::new(channels).map_err(|_| invalid())
    }

    pub fn channels(&self) -> [Channel; 3] {
        self.0
    }

    /// Source index for each output slot.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Channel::index)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The order that undoes this one.
    pub fn inverse(&self) -> Self {
        let mut inverse = [Channel::Red; 3];
        for (destination, source) in self.0.iter().enumerate() {
            // Slot `source` of the inverse reads back from `destination`.
            inverse[source.index()] = Channel::ALL[destination];
        }
        Self(inverse)
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.0 {
            write!(f, "{}", channel.letter())?;
        }
        Ok(())
    }
}

impl FromStr for ChannelOrder {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChannelOrder {
    type Error = ChromaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<[usize; 3]> for ChannelOrder {
    type Error = ChromaError;

    fn try_from(value: [usize; 3]) -> Result<Self, Self::Error> {
        Self::from_indices(value)
    }
}

impl From<ChannelOrder> for String {
    fn from(order: ChannelOrder) -> Self {
        order.to_string()
    }
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Canonical file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}

/// Which row/column profile contract to plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileMode {
    /// One scalar per position: mean over the other axis and all channels.
    #[default]
    Collapsed,
    /// Three series per axis, one mean per channel.
    PerChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_permutation() {
        for spec in ["RGB", "RBG", "GRB", "GBR", "BRG", "BGR"] {
            let order = ChannelOrder::parse(spec).expect("valid order");
            assert_eq!(order.to_string(), spec);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        let order: ChannelOrder = "bgr".parse().expect("lowercase order");
        assert_eq!(order.indices(), [2, 1, 0]);
    }

    #[test]
    fn rejects_malformed_orders() {
        for spec in ["RRB", "RG", "RGBA", "RGX", "", "R G"] {
            match ChannelOrder::parse(spec) {
                Err(ChromaError::InvalidOrderSpec(s)) => assert_eq!(s, spec),
                other => panic!("expected InvalidOrderSpec for {spec:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_indices_matches_letters() {
        let by_index = ChannelOrder::from_indices([1, 2, 0]).expect("valid indices");
        assert_eq!(by_index, ChannelOrder::parse("GBR").unwrap());
        assert!(ChannelOrder::from_indices([0, 0, 1]).is_err());
        assert!(ChannelOrder::from_indices([0, 1, 3]).is_err());
    }

    #[test]
    fn inverse_composes_to_identity() {
        for order in ChannelOrder::ALL {
            let inverse = order.inverse();
            let composed = order.indices().map(|i| inverse.indices()[i]);
            assert_eq!(composed, [0, 1, 2], "order {order}");
        }
        let gbr = ChannelOrder::parse("GBR").unwrap();
        assert_eq!(gbr.inverse().to_string(), "BRG");
    }

    #[test]
    fn all_orders_are_distinct() {
        for (i, a) in ChannelOrder::ALL.iter().enumerate() {
            for b in &ChannelOrder::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(ChannelOrder::ALL[0].is_identity());
    }

    #[test]
    fn order_serialises_as_string() {
        let order = ChannelOrder::parse("BRG").unwrap();
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, "\"BRG\"");
        let back: ChannelOrder = serde_json::from_str("\"brg\"").unwrap();
        assert_eq!(back, order);
        assert!(serde_json::from_str::<ChannelOrder>("\"RRR\"").is_err());
    }

    #[test]
    fn image_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("JPEG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("tiff"), None);
    }
}
