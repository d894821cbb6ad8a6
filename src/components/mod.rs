//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod home;
pub mod inquiry_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod screenshot_dialog;
pub mod splash;

pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use inquiry_dialog::InquiryDialog;
pub use layout::{calculate_home_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use screenshot_dialog::ScreenshotDialog;
pub use splash::SplashComponent;
