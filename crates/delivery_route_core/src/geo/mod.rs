pub(crate) mod distance;
