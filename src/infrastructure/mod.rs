//! 基础设施层
//!
//! 本地文件的获取方式（选择器 / 拖放），只产出 `FileHandle`。

pub mod drop_zone;
pub mod file_intake;

pub use drop_zone::DropZone;
pub use file_intake::{accepted_extensions, is_accepted, FileHandle, FilePicker};
