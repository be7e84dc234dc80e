use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::sync::oneshot;
use tokio::time::{timeout_at, Instant};
pub use tokio::time::Duration;

use crate::error::LoggerError;
use crate::event::{Event, Layout};
use crate::levels::Level;
use crate::output::Output;

/// Room left in the queue on top of one full batch.
const QUEUE_HEADROOM: usize = 20;

/// Traffic between a [`BatchOutput`] and its worker.
#[derive(Debug)]
pub enum BatchMessage {
    /// A rendered line and the level it was logged at.
    Line(Level, String),
    /// Write whatever is queued, then acknowledge if asked to. The reply
    /// carries the first write error since the previous acknowledged flush.
    Flush(Option<oneshot::Sender<Result<(), LoggerError>>>),
}

/// Destination of a batch worker.
#[async_trait::async_trait]
pub trait Sink: Send {
    async fn write_batch(&mut self, lines: Vec<String>) -> Result<(), LoggerError>;
}

/// Writes each batch to an async writer, one line per event, and flushes it.
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait::async_trait]
impl<W> Sink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_batch(&mut self, lines: Vec<String>) -> Result<(), LoggerError> {
        for line in lines {
            self.writer.write_all(line.as_bytes()).await?;
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
pub trait Setup<S, T, E> {
    async fn setup(sink: S, batch_size: usize, interval: Duration) -> Result<T, E>;
}

/// Worker side of a batched output.
///
/// A failed write does not stop the worker: its lines are counted as dropped
/// and the error is handed to the next `flush`.
pub struct BatchHandle<S> {
    receiver: Receiver<BatchMessage>,
    sink: S,
    max_log_count: usize,
    interval: Duration,
    dropped: Arc<AtomicUsize>,
    error: Option<LoggerError>,
}

#[async_trait::async_trait]
impl<S> Setup<S, BatchOutput, LoggerError> for BatchHandle<S>
where
    S: Sink + 'static,
{
    /// Spawns the worker on the current tokio runtime and returns the output
    /// that feeds it.
    ///
    /// # Arguments
    ///
    /// * `sink` - Where batches are written.
    /// * `batch_size` - Number of lines to collect before writing.
    /// * `interval` - Longest time a line waits in the batch.
    ///
    /// # Returns
    ///
    /// A `BatchOutput` to register with a logger, or `InvalidArgument` when
    /// `batch_size` is zero.
    async fn setup(sink: S, batch_size: usize, interval: Duration) -> Result<BatchOutput, LoggerError> {
        if batch_size == 0 {
            return Err(LoggerError::InvalidArgument);
        }

        let (sender, receiver) = channel(batch_size + QUEUE_HEADROOM);
        let output = BatchOutput::new(sender);

        let mut myself = Self {
            receiver,
            sink,
            max_log_count: batch_size,
            interval,
            dropped: output.dropped.clone(),
            error: None,
        };

        tokio::spawn(async move {
            let _ = myself.run().await;
        });

        Ok(output)
    }
}

impl<S: Sink> BatchHandle<S> {
    /// Collects lines and writes them when the batch is full, when the
    /// oldest line has waited `interval`, on `ERROR` or worse, on flush and
    /// on shutdown.
    ///
    /// # Returns
    ///
    /// The first write error not yet reported through a flush.
    pub async fn run(&mut self) -> Result<(), LoggerError> {
        let mut batch = Vec::with_capacity(self.max_log_count);
        let mut deadline: Option<Instant> = None;

        loop {
            let received = match deadline {
                Some(at) => match timeout_at(at, self.receiver.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        self.write(core::mem::take(&mut batch)).await;
                        deadline = None;
                        continue;
                    }
                },
                None => self.receiver.recv().await,
            };

            let message = match received {
                Some(message) => message,
                None => break,
            };

            #[cfg(feature = "DEBUG")]
            println!("{:?}", message);
            match message {
                BatchMessage::Line(level, line) => {
                    if batch.is_empty() {
                        deadline = Some(Instant::now() + self.interval);
                    }
                    batch.push(line);
                    if level >= Level::ERROR || batch.len() >= self.max_log_count {
                        self.write(core::mem::take(&mut batch)).await;
                        deadline = None;
                    }
                }
                BatchMessage::Flush(ack) => {
                    self.write(core::mem::take(&mut batch)).await;
                    deadline = None;
                    if let Some(ack) = ack {
                        let _ = ack.send(self.error.take().map_or(Ok(()), Err));
                    }
                }
            }
        }

        self.write(batch).await;

        self.error.take().map_or(Ok(()), Err)
    }

    async fn write(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        let count = lines.len();
        if let Err(e) = self.sink.write_batch(lines).await {
            #[cfg(feature = "DEBUG")]
            println!("batch of {} lines lost: {}", count, e);
            self.dropped.fetch_add(count, Ordering::Relaxed);
            self.error.get_or_insert(e);
        }
    }
}

/// Output half of a batch worker. Clones feed the same worker.
///
/// Events are queued without blocking; when the queue is full the line is
/// dropped and counted.
#[derive(Clone, Debug)]
pub struct BatchOutput {
    sender: Sender<BatchMessage>,
    dropped: Arc<AtomicUsize>,
}

impl BatchOutput {
    fn new(sender: Sender<BatchMessage>) -> Self {
        Self {
            sender,
            dropped: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Writes everything queued so far and waits until the sink is done.
    ///
    /// # Returns
    ///
    /// The first write error since the previous flush, or `Closed` when the
    /// worker is gone.
    pub async fn flush(&self) -> Result<(), LoggerError> {
        let (ack, done) = oneshot::channel();
        self.sender
            .send(BatchMessage::Flush(Some(ack)))
            .await
            .map_err(|_| LoggerError::Closed)?;
        done.await.map_err(|_| LoggerError::Closed)?
    }

    /// Asks the worker to flush without waiting for it.
    pub fn request_flush(&self) -> Result<(), LoggerError> {
        self.sender
            .try_send(BatchMessage::Flush(None))
            .map_err(|_| LoggerError::Busy)
    }

    /// Number of lines lost to a full or closed queue or to a failed write.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Output for BatchOutput {
    fn write_event(&mut self, event: &Event<'_>) {
        let line = event.render(Layout::File);
        if self.sender.try_send(BatchMessage::Line(event.level(), line)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::prelude::tests::setup;

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<Vec<String>>>>);

    impl Collect {
        fn batches(&self) -> Vec<Vec<String>> {
            self.0.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Sink for Collect {
        async fn write_batch(&mut self, lines: Vec<String>) -> Result<(), LoggerError> {
            self.0.lock().unwrap().push(lines);
            Ok(())
        }
    }

    fn sizes(batches: &[Vec<String>]) -> Vec<usize> {
        batches.iter().map(Vec::len).collect()
    }

    #[tokio::test]
    async fn full_batch_is_written() {
        let sink = Collect::default();
        let output = BatchHandle::setup(sink.clone(), 2, Duration::from_secs(60)).await.unwrap();
        let (logger, _) = setup();
        logger.output_add(output.clone(), Level::TRACE).unwrap();

        crate::ulog_info!(logger: logger, "test1");
        crate::ulog_info!(logger: logger, "test2");
        crate::ulog_info!(logger: logger, "test3");
        output.flush().await.unwrap();

        let batches = sink.batches();
        assert_eq!(sizes(&batches), vec![2, 1]);
        assert!(batches[0][0].ends_with("test1"));
        assert!(batches[0][1].ends_with("test2"));
        assert!(batches[1][0].starts_with("INFO "));
    }

    #[tokio::test]
    async fn errors_are_written_immediately() {
        let sink = Collect::default();
        let output = BatchHandle::setup(sink.clone(), 10, Duration::from_secs(60)).await.unwrap();
        let (logger, _) = setup();
        logger.output_add(output.clone(), Level::TRACE).unwrap();

        crate::ulog_info!(logger: logger, "before");
        crate::ulog_error!(logger: logger, "failure");
        crate::ulog_info!(logger: logger, "after");
        output.flush().await.unwrap();

        assert_eq!(sizes(&sink.batches()), vec![2, 1]);
    }

    #[tokio::test]
    async fn interval_writes_partial_batch() {
        let sink = Collect::default();
        let output = BatchHandle::setup(sink.clone(), 10, Duration::from_millis(50)).await.unwrap();
        let (logger, _) = setup();
        logger.output_add(output, Level::TRACE).unwrap();

        crate::ulog_warn!(logger: logger, "waiting");
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(sizes(&sink.batches()), vec![1]);
    }

    #[tokio::test]
    async fn shutdown_writes_remainder() {
        let sink = Collect::default();
        let (sender, receiver) = channel(8);
        let mut handle = BatchHandle {
            receiver,
            sink: sink.clone(),
            max_log_count: 8,
            interval: Duration::from_secs(60),
            dropped: Arc::new(AtomicUsize::new(0)),
            error: None,
        };

        sender.send(BatchMessage::Line(Level::INFO, "one".into())).await.unwrap();
        sender.send(BatchMessage::Line(Level::DEBUG, "two".into())).await.unwrap();
        drop(sender);
        handle.run().await.unwrap();

        assert_eq!(sink.batches(), vec![vec!["one".to_string(), "two".to_string()]]);
    }

    #[tokio::test]
    async fn steady_trickle_still_meets_interval() {
        let sink = Collect::default();
        let output = BatchHandle::setup(sink.clone(), 100, Duration::from_millis(100)).await.unwrap();
        let (logger, _) = setup();
        logger.output_add(output, Level::TRACE).unwrap();

        for i in 0..12 {
            crate::ulog_info!(logger: logger, "line {}", i);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let batches = sink.batches();
        assert!(!batches.is_empty());
        assert!(sizes(&batches).iter().sum::<usize>() >= 2);
        assert!(batches[0].len() < 12);
    }

    /// Fails its first write, then collects.
    #[derive(Clone, Default)]
    struct FailOnce {
        failed: bool,
        inner: Collect,
    }

    #[async_trait::async_trait]
    impl Sink for FailOnce {
        async fn write_batch(&mut self, lines: Vec<String>) -> Result<(), LoggerError> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            self.inner.write_batch(lines).await
        }
    }

    #[tokio::test]
    async fn failed_write_keeps_worker_running() {
        let sink = FailOnce::default();
        let collected = sink.inner.clone();
        let output = BatchHandle::setup(sink, 10, Duration::from_secs(60)).await.unwrap();
        let (logger, _) = setup();
        logger.output_add(output.clone(), Level::TRACE).unwrap();

        crate::ulog_error!(logger: logger, "lost");
        crate::ulog_info!(logger: logger, "kept");

        assert!(matches!(output.flush().await, Err(LoggerError::Io(_))));
        assert_eq!(output.dropped(), 1);
        let batches = collected.batches();
        assert_eq!(sizes(&batches), vec![1]);
        assert!(batches[0][0].ends_with("kept"));

        crate::ulog_info!(logger: logger, "after");
        assert!(output.flush().await.is_ok());
        assert_eq!(sizes(&collected.batches()), vec![1, 1]);
    }

    #[tokio::test]
    async fn flush_after_worker_stops_is_closed() {
        let (sender, receiver) = channel(1);
        let output = BatchOutput::new(sender);
        drop(receiver);
        assert!(matches!(output.flush().await, Err(LoggerError::Closed)));
    }

    #[test]
    fn full_queue_counts_drops() {
        let (sender, _receiver) = channel(1);
        let output = BatchOutput::new(sender);
        let (logger, _) = setup();
        logger.output_add(output.clone(), Level::TRACE).unwrap();

        crate::ulog_info!(logger: logger, "queued");
        crate::ulog_info!(logger: logger, "dropped");
        crate::ulog_info!(logger: logger, "dropped too");

        assert_eq!(output.dropped(), 2);
        assert!(matches!(output.request_flush(), Err(LoggerError::Busy)));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let result = tokio_test::block_on(BatchHandle::setup(
            Collect::default(), 0, Duration::from_secs(1),
        ));
        assert!(matches!(result, Err(LoggerError::InvalidArgument)));
    }

    #[test]
    fn writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        tokio_test::block_on(sink.write_batch(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(sink.into_inner(), b"a\nb\n");
    }
}
