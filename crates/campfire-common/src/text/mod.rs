//! Text and upload helpers shared by the service and API layers

mod format;
mod upload;

pub use format::{time_ago, validate_url};
pub use upload::{allowed_extension, file_extension, generate_upload_filename, UploadKind};
