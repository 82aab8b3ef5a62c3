pub(crate) mod bucket;
pub(crate) mod composite;
pub(crate) mod fill;
pub(crate) mod geometry;
pub(crate) mod offset;
pub(crate) mod sample;
pub(crate) mod set;
