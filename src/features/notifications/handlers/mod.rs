pub mod notification_handler;

pub use notification_handler::{
    __path_list_notifications, __path_mark_notification_read, list_notifications,
    mark_notification_read,
};
