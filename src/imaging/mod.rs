pub(crate) mod color_key;
pub(crate) mod mask;
pub(crate) mod ops;
