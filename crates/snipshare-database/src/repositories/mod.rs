//! Repository implementations for all Snipshare entities.

pub mod access_log;
pub mod comment;
pub mod message;
pub mod notification;
pub mod report;
pub mod settings;
pub mod share;
pub mod snippet;
pub mod user;

pub use access_log::ShareAccessLogRepository;
pub use comment::CommentRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use report::CommentReportRepository;
pub use settings::SystemSettingRepository;
pub use share::ShareTokenRepository;
pub use snippet::SnippetRepository;
pub use user::UserRepository;
