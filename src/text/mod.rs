pub(crate) mod engine;
pub(crate) mod label;
pub(crate) mod watermark;
