pub(crate) mod batch;
pub(crate) mod refine;
pub(crate) mod sequence;
