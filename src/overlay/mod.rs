//! Artwork drawn over captured photos and finished layouts: stickers and frames.

pub(crate) mod custom;
pub(crate) mod frame;
pub(crate) mod sticker;
