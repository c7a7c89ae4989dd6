//! Progress notifications.

use tokio::sync::watch;

/// Receives the running number of items aggregated so far.
///
/// `report` is called synchronously from the traversal after every merged page, so it should
/// return quickly.
pub trait Progress: Send + Sync {
    fn report(&self, count: usize);
}

impl<F> Progress for F
where
    F: Fn(usize) + Send + Sync,
{
    fn report(&self, count: usize) {
        self(count);
    }
}

/// Publishes the latest count. Works whether or not anyone is subscribed.
impl Progress for watch::Sender<usize> {
    fn report(&self, count: usize) {
        self.send_replace(count);
    }
}

/// The running total of one traversal and the sink it is reported to.
pub(crate) struct Tally<'a> {
    sink: Option<&'a dyn Progress>,
    count: usize,
    reported: Option<usize>,
}

impl<'a> Tally<'a> {
    pub(crate) fn new(sink: Option<&'a dyn Progress>) -> Self {
        Self {
            sink,
            count: 0,
            reported: None,
        }
    }

    pub(crate) fn add(&mut self, items: usize) {
        self.count += items;
    }

    pub(crate) fn report(&mut self) {
        if let Some(sink) = self.sink {
            sink.report(self.count);
        }
        self.reported = Some(self.count);
    }

    /// Reports only if the count moved since the last report.
    pub(crate) fn report_if_advanced(&mut self) {
        if self.reported != Some(self.count) {
            self.report();
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}
