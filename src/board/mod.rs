pub mod gesture;
pub mod note;
pub mod render;
pub mod session;
pub mod viewport;

pub use gesture::{GestureCommit, GestureController, GesturePreview, GestureState, PointerTarget};
pub use note::{Note, NoteId, NotePatch, NewNote};
pub use render::{LayerCommand, RenderedNote};
pub use session::{BoardSession, SaveOutcome};
pub use viewport::{Point, ViewportTransform};
