pub(crate) mod ffmpeg;
pub(crate) mod raster;
pub(crate) mod web;
