pub(crate) mod color;
pub(crate) mod decoded;
pub(crate) mod source;
