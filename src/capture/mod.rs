//! Per-slot capture: frame sources, aspect cropping, the auto-capture countdown and the
//! capture pipeline that chains them with filters and stickers.

pub(crate) mod countdown;
pub(crate) mod crop;
pub(crate) mod pipeline;
pub(crate) mod source;
