//! 数据模型模块

pub mod attachment;
pub mod session;

pub use attachment::{Attachment, UploadKind};
pub use session::{render_transcript, ChatRole, ChatTurn, Session, WorkflowStatus};
