mod has_one;
pub use has_one::HasOne;
