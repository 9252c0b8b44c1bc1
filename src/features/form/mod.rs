pub mod attachments;
pub mod controller;

pub use attachments::{ImageAttachment, PreviewRegistry, SelectionNotice};
pub use controller::{FormMode, ReportFormController};
