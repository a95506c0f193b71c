//! Visual building blocks: the pressable button, the label, and the popup
//! panel that every overlay is built on.

pub mod button;
pub mod final_result_popup;
pub mod label;
pub mod popup;

pub use button::{Button, ButtonState, ButtonStyle, Glow};
pub use final_result_popup::FinalResultPopup;
pub use label::Label;
pub use popup::{Overlay, OverlayId, PanelPhase, PanelSettled, PopupPanel};
