/// Shows short transient messages to the user.
pub trait NotificationSink: Send + Sync {
    fn notice(&self, message: &str);
}
