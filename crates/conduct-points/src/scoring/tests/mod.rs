mod common;
mod scope;
mod semester;
