pub(crate) mod buffer;
pub(crate) mod encode;
