//! Input vocabulary shared by Formwork hosts and widgets.
//!
//! Hosts translate their native events (DOM, winit, terminal) into these
//! types; widgets never see platform events directly.

pub mod batch;
pub mod keyboard;
pub mod status;

pub use batch::EventBatch;
pub use keyboard::{Key, KeyEvent, Modifiers};
pub use status::HandleStatus;
