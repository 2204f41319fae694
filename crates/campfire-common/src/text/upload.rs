use chrono::{DateTime, Utc};
use rand::Rng;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const POST_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];
// No svg: uploads are served from our origin and svg can carry script
const LOGO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const FAVICON_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "ico"];

/// Where an uploaded file is going, which decides its folder and allowed types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePicture,
    TeamAvatar,
    PostImage,
    PostVideo,
    Logo,
    Favicon,
}

impl UploadKind {
    /// Every folder below the upload root, created at startup
    pub const FOLDERS: [&'static str; 5] = ["profiles", "posts", "videos", "teams", "branding"];

    pub fn folder(&self) -> &'static str {
        match self {
            Self::ProfilePicture => "profiles",
            Self::TeamAvatar => "teams",
            Self::PostImage => "posts",
            Self::PostVideo => "videos",
            Self::Logo | Self::Favicon => "branding",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::ProfilePicture | Self::TeamAvatar => IMAGE_EXTENSIONS,
            Self::PostImage => POST_IMAGE_EXTENSIONS,
            Self::PostVideo => VIDEO_EXTENSIONS,
            Self::Logo => LOGO_EXTENSIONS,
            Self::Favicon => FAVICON_EXTENSIONS,
        }
    }

    /// Post attachments pick image or video from the extension
    pub fn for_post_media(ext: &str) -> Option<Self> {
        if POST_IMAGE_EXTENSIONS.contains(&ext) {
            Some(Self::PostImage)
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Some(Self::PostVideo)
        } else {
            None
        }
    }
}

/// Lowercased extension after the last dot, if any
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn allowed_extension(filename: &str, kind: UploadKind) -> Option<String> {
    file_extension(filename).filter(|ext| kind.allowed_extensions().contains(&ext.as_str()))
}

/// `%Y%m%d%H%M%S_NNNN.ext` with a random four-digit suffix
pub fn generate_upload_filename(ext: &str, now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{}_{suffix}.{ext}", now.format("%Y%m%d%H%M%S"))
}
