//! File picker widget using rfd (rust file dialog).
//!
//! Opens a native dialog and turns the choice into a [`PickEvent`].

use shared::{PickEvent, SelectedFile};
use std::path::PathBuf;

/// File picker widget for selecting the document to upload.
pub struct FilePickerWidget {
    /// File type filters (e.g., PDF only)
    filters: Vec<FileFilter>,
    /// Starting directory
    start_dir: Option<PathBuf>,
    /// Dialog title
    title: String,
}

/// Filter for file types.
#[derive(Clone)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn pdf() -> Self {
        Self::new("PDF Documents", &["pdf"])
    }

    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }
}

impl Default for FilePickerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerWidget {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            start_dir: None,
            title: "Select File".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Blocking pick: opens the native dialog and waits.
    ///
    /// A cancelled dialog yields an empty event.
    pub fn pick(&mut self) -> PickEvent {
        let mut dialog = rfd::FileDialog::new().set_title(&self.title);

        for filter in &self.filters {
            let ext_refs: Vec<&str> = filter.extensions.iter().map(|s| s.as_str()).collect();
            dialog = dialog.add_filter(&filter.name, &ext_refs);
        }

        if let Some(ref dir) = self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file();
        if let Some(parent) = picked.as_ref().and_then(|p| p.parent()) {
            self.start_dir = Some(parent.to_path_buf());
        }
        pick_event_for(picked)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filters(&self) -> &[FileFilter] {
        &self.filters
    }
}

fn pick_event_for(picked: Option<PathBuf>) -> PickEvent {
    match picked {
        Some(path) => PickEvent::single(SelectedFile::from_path(path)),
        None => PickEvent::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_picker_creation() {
        let picker = FilePickerWidget::new()
            .with_title("Choose a PDF")
            .with_filter(FileFilter::pdf());

        assert_eq!(picker.title(), "Choose a PDF");
        assert_eq!(picker.filters().len(), 1);
        assert_eq!(picker.filters()[0].extensions, vec!["pdf".to_string()]);
    }

    #[test]
    fn test_pick_event_for_choice() {
        let event = pick_event_for(Some(PathBuf::from("/docs/invoice.pdf")));
        assert_eq!(event.files.len(), 1);
        assert_eq!(event.files[0].name, "invoice.pdf");

        assert!(pick_event_for(None).files.is_empty());
    }
}
