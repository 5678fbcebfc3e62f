pub(crate) mod engine;
pub(crate) mod index;
pub(crate) mod model;
pub(crate) mod stream;
