pub(crate) mod channel;
pub(crate) mod colorspace;
pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod threading;
