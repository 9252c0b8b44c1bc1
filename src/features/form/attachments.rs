use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use crate::shared::constants::MAX_IMAGE_BYTES;

/// A locally selected file, from a picker or drag-drop.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Per-file notice produced while screening a selection. Violations never
/// abort acceptance of the valid files alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNotice {
    NotAnImage { file_name: String },
    TooLarge { file_name: String, size: usize },
    LimitReached { dropped: usize },
}

impl fmt::Display for SelectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionNotice::NotAnImage { file_name } => {
                write!(f, "{} is not an image file", file_name)
            }
            SelectionNotice::TooLarge { file_name, .. } => {
                write!(f, "{} exceeds 5MB limit", file_name)
            }
            SelectionNotice::LimitReached { dropped } => {
                write!(f, "Maximum 5 images allowed ({} dropped)", dropped)
            }
        }
    }
}

/// Screen a batch of picked files: reject non-images and oversized files
/// with one notice per violating file, then truncate to the remaining
/// photo slots.
pub fn screen_files(
    files: Vec<ImageAttachment>,
    slots_left: usize,
) -> (Vec<ImageAttachment>, Vec<SelectionNotice>) {
    let mut notices = Vec::new();
    let mut accepted = Vec::new();

    for file in files {
        if !file.is_image() {
            notices.push(SelectionNotice::NotAnImage {
                file_name: file.file_name,
            });
            continue;
        }
        if file.size() > MAX_IMAGE_BYTES {
            notices.push(SelectionNotice::TooLarge {
                size: file.size(),
                file_name: file.file_name,
            });
            continue;
        }
        accepted.push(file);
    }

    if accepted.len() > slots_left {
        notices.push(SelectionNotice::LimitReached {
            dropped: accepted.len() - slots_left,
        });
        accepted.truncate(slots_left);
    }

    (accepted, notices)
}

/// Identifier for a locally created preview URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(Uuid);

impl PreviewId {
    pub fn url(&self) -> String {
        format!("blob:{}", self.0)
    }
}

/// Tracks live preview URLs so every one of them is released on every exit
/// path: image removal, form reset, and controller teardown.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: HashSet<PreviewId>,
}

impl PreviewRegistry {
    pub fn create(&mut self) -> PreviewId {
        let id = PreviewId(Uuid::new_v4());
        self.live.insert(id);
        id
    }

    pub fn release(&mut self, id: PreviewId) {
        if !self.live.remove(&id) {
            tracing::warn!("Releasing unknown preview handle {:?}", id);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
