pub(crate) mod channel;
pub(crate) mod expr;
pub(crate) mod generator;
pub(crate) mod phase;
pub(crate) mod wave;
