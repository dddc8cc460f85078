//! The editing engine: buffer, layout, cursor and selection, input intents
//! and render planning. Nothing in here depends on the terminal.

pub mod buffer;
pub mod clipboard;
pub mod controller;
pub mod cursor;
pub mod geometry;
pub mod notify;
pub mod render;

pub use buffer::{ByteBuffer, EditMode, Target};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use controller::{EditResult, Editor, Intent, Motion};
pub use cursor::{Cursor, CursorModel, Pane, Selection};
pub use geometry::{FontMetrics, Geometry, PixelRect, Viewport};
pub use notify::{Notification, Notifications};
pub use render::{ByteStyle, Colorizer, DrawPrimitive, GridSurface, PaintSurface, RenderPlanner};
