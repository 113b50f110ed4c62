pub(crate) mod bowyer_watson;
mod observer;
mod parameters;
mod primitives;

pub(crate) mod math;

pub use observer::{CollinearTripleWarning, InsertionObserver, InsertionStep, NoObserver};
pub use parameters::{TriangulationParameters, DEFAULT_SUPER_TRIANGLE_SCALE};
pub use primitives::{Circumcircle, Edge, FixedVertexHandle, Triangle, Vertex};
