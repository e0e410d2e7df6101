pub(crate) mod sweep;
