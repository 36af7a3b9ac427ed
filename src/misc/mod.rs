pub(crate) mod slice_split3;
