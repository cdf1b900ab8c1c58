//! Local placeholder files

/// A directory entry observed in the export directory
///
/// Only the name matters: the base name selects the node to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAsset {
    /// Full file name as listed (`Login.png`)
    pub file_name: String,

    /// File name with the last dot-delimited segment removed (`Login`)
    pub base_name: String,

    /// Last dot-delimited segment, if the name has one (`png`)
    pub extension: Option<String>,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl LocalAsset {
    /// Decompose a file name into base name and extension
    ///
    /// Only the last segment is stripped, so `icon.dark.png` has base name
    /// `icon.dark`. A name without a dot has an empty base name and never
    /// selects a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use figma_exporter::domain::LocalAsset;
    ///
    /// let asset = LocalAsset::file("Login.png");
    /// assert_eq!(asset.base_name, "Login");
    /// assert_eq!(asset.extension.as_deref(), Some("png"));
    /// ```
    pub fn file(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let (base_name, extension) = match file_name.rsplit_once('.') {
            Some((base, ext)) => (base.to_string(), Some(ext.to_string())),
            None => (String::new(), None),
        };

        Self {
            file_name,
            base_name,
            extension,
            is_dir: false,
        }
    }

    /// A directory entry; never matched against node names
    pub fn directory(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            base_name: name.clone(),
            file_name: name,
            extension: None,
            is_dir: true,
        }
    }
}
