mod common;
mod model;
mod ranking;
