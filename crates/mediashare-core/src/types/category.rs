//! Media categories used to group stored files for browsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extensions accepted by the upload endpoint (compared lower-cased).
pub const UPLOAD_EXTENSIONS: &[&str] = &["txt", "pdf", "png", "jpg", "jpeg", "gif", "mp4"];

/// A browsable media category.
///
/// Category membership is a case-sensitive suffix match, so `PHOTO.JPG`
/// belongs to no category. `Videos` also lists `.avi` and `.mov`, which the
/// upload allow-set never accepts; such files only appear when placed in the
/// directory out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    /// Text and PDF documents.
    Documents,
    /// Still images.
    Images,
    /// Video files.
    Videos,
}

impl MediaCategory {
    /// All categories, in navigation order.
    pub const ALL: [MediaCategory; 3] = [Self::Documents, Self::Images, Self::Videos];

    /// File name suffixes belonging to this category.
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Documents => &[".txt", ".pdf"],
            Self::Images => &[".png", ".jpg", ".jpeg", ".gif"],
            Self::Videos => &[".mp4", ".avi", ".mov"],
        }
    }

    /// Returns `true` if `filename` ends with one of this category's suffixes.
    pub fn matches(self, filename: &str) -> bool {
        self.suffixes().iter().any(|s| filename.ends_with(s))
    }

    /// URL slug, also used as the route path.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Images => "Images",
            Self::Videos => "Videos",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
