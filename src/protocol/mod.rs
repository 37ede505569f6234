mod mask;

pub use mask::apply_mask;
