pub(crate) mod text_box;
