pub(crate) mod composite;
pub(crate) mod dispatch;
pub(crate) mod scale;
