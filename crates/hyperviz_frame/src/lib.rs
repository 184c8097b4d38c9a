//! Strut-based frame assembly for the hyperviz scene pipeline.
//!
//! Takes the triangle geometry and edge sets produced by `hyperviz_geom` and
//! turns them into renderable line structures: a [`WireframeMesh`] tracing the
//! true edges of a solid, and a [`Hyperframe`] of nested shells and connector
//! struts suggesting the higher-dimensional structure of the 4D families.
//! Materials are shared handles so that palette changes propagate to every
//! structure built from the same cache entry.

mod cache;
mod cell_frames;
mod generic_frame;
mod hyperframe;
mod material;
mod shells;
mod strut;
mod tesseract_frame;
mod wireframe;

pub use cache::{frame_signature, HyperframeCache, MaterialCache};
pub use cell_frames::build_cell_frame;
pub use generic_frame::{build_generic_frame, GenericFrameParams};
pub use hyperframe::{build_hyperframe, FrameInstanceData, Hyperframe, LineGroup};
pub use material::{LineHandle, LineMaterial, MaterialConfig, SolidHandle, SolidMaterial};
pub use shells::{
    base_edge_length, build_shell_frame, classify_pair, select_shell_pairs, DiagonalThresholds,
    PairClass, ShellFrameConfig, ShellPairs,
};
pub use strut::{Strut, StrutStyle, StrutTransform};
pub use tesseract_frame::{build_tesseract_frame, TesseractFrameParams};
pub use wireframe::{assemble_wireframe, VertexNode, WireframeMesh};
