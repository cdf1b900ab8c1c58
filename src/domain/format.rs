//! Export image formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image format requested from the render endpoint
///
/// The lowercase name doubles as the `format` query value and as the
/// extension of the written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    /// All supported formats, in the order `formats` prints them
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Jpg,
        ImageFormat::Png,
        ImageFormat::Svg,
        ImageFormat::Pdf,
    ];

    /// Query value and file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }

    /// File extension for written files
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            other => Err(format!(
                "'{other}' is unsupported format. Must be one of: {}",
                ImageFormat::ALL
                    .iter()
                    .map(ImageFormat::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}
