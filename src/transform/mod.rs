pub(crate) mod log_polar;
pub(crate) mod shear;
