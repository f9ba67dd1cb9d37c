mod editor;

pub use editor::EditorPage;
