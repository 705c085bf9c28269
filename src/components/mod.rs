pub mod app;
pub mod nav;
pub mod post_composer;
pub mod upload_list;

pub use app::App;
pub use nav::{nav_controls, Nav, NavControl};
pub use post_composer::PostComposer;
pub use upload_list::UploadList;
