mod call;
mod collection;
mod fragment;
mod value;

pub use call::render_call;
pub use collection::{render_collection, render_map};
pub use fragment::{Atoms, FragmentBuilder, FragmentPart, RenderedFragment, StyleClass, StyledAtom};
pub use value::render;
