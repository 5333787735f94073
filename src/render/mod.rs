pub(crate) mod backend;
pub(crate) mod background;
pub(crate) mod compositor;
pub(crate) mod raster;
