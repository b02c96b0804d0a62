use tracing::info;

/// Receives short user-facing confirmations after mutations.
///
/// Fire-and-forget: implementations must not panic and have no way to
/// report failure back into the store.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

/// Production sink that surfaces notifications as structured log events
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, title: &str, body: &str) {
        info!(title = %title, "{}", body);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::*;

    #[test]
    fn test_recording_sink_captures_messages() {
        let sink = RecordingSink::default();
        sink.notify("Assignment added", "Essay has been added to your homework list.");
        sink.notify("Assignment deleted", "The assignment has been removed.");

        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, "Assignment added");
        assert_eq!(messages[1].1, "The assignment has been removed.");
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        LogSink.notify("Assignment added", "body");
    }
}
