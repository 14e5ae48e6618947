pub mod packs;
pub mod rubric;
