pub(crate) mod blur;
pub(crate) mod filter;
pub(crate) mod preview;
pub(crate) mod skin;
