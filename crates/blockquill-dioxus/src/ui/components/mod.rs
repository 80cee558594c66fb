pub mod block;
pub mod block_button;
pub mod editor_surface;
pub mod editor_tools;
pub mod image_button;
pub mod leaf;
pub mod limit_input;
pub mod mark_button;
pub mod notice_dialog;
pub mod save_controls;
pub mod toolbar;

pub use block::Block;
pub use block_button::BlockButton;
pub use editor_surface::EditorSurface;
pub use editor_tools::EditorTools;
pub use image_button::ImageButton;
pub use limit_input::LimitInput;
pub use mark_button::MarkButton;
pub use notice_dialog::NoticeDialog;
pub use save_controls::SaveControls;
pub use toolbar::Toolbar;
