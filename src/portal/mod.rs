//! Collaborators around the viewer: storage, client records, admin operations,
//! client sessions and file previews.

mod admin;
mod directory;
mod preview;
mod session;
mod storage;

pub use admin::{AdminConsole, Upload};
pub use directory::{ClientDirectory, ClientFile, ClientRecord, JsonDirectory};
pub use preview::{FilePreview, PreviewSheet};
pub use session::{ClientSession, SessionStatus, NO_FILES_MESSAGE};
pub use storage::{FileSource, FsFileSource, FsObjectStore, MemoryObjectStore, ObjectStore};
