pub(crate) mod canvas;
pub(crate) mod exchange;
pub(crate) mod overlay;
pub(crate) mod settings;
