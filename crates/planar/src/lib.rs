#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use planar_transforms as transforms;

#[doc(inline)]
pub use planar_viz as viz;
