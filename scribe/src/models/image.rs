/// Image formats the recognizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Classifies a raw `Content-Type` header value.
    ///
    /// Matching is by substring so parameters such as `; charset=binary` are
    /// tolerated. JPEG wins when both tokens appear.
    pub fn from_content_type(content_type: Option<&str>) -> Option<Self> {
        let content_type = content_type?;
        if content_type.contains("image/jpeg") {
            Some(ImageKind::Jpeg)
        } else if content_type.contains("image/png") {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}
