use std::io::Read;
use std::sync::{Arc, Mutex as StdMutex};

use serde::Serialize;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::camera::CameraTransform;
use crate::stream::builder::{moving_descriptor, stop_descriptor};
use crate::stream::descriptor::AnimationDescriptor;
use crate::stream::error::StreamError;
use crate::stream::source::SampleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamPhase {
    Idle,
    Streaming,
    Paused,
    Stopped,
}

#[derive(Debug)]
struct Shared {
    phase: StreamPhase,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Drives a sample source from a background task and publishes one animation
/// descriptor per usable fix into a latest-value cell. Camera-change
/// notifications pause the stream without tearing the worker down; the next
/// fix restarts the animation. Dropping the controller cancels the worker.
pub struct MarkerStream {
    camera: Arc<dyn CameraTransform>,
    shared: Arc<StdMutex<Shared>>,
    updates: watch::Sender<Option<AnimationDescriptor>>,
    worker: Option<WorkerHandle>,
}

impl MarkerStream {
    pub fn new(camera: Arc<dyn CameraTransform>) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            camera,
            shared: Arc::new(StdMutex::new(Shared {
                phase: StreamPhase::Idle,
            })),
            updates,
            worker: None,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.shared.lock().unwrap().phase
    }

    /// Latest published descriptor. Last value wins: an observer that lags
    /// only sees the most recent update, never a backlog.
    pub fn subscribe(&self) -> watch::Receiver<Option<AnimationDescriptor>> {
        self.updates.subscribe()
    }

    pub fn start<R>(&mut self, source: SampleSource<R>) -> Result<(), StreamError>
    where
        R: Read + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(StreamError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let camera = self.camera.clone();
        let updates = self.updates.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        shared.lock().unwrap().phase = StreamPhase::Streaming;

        let join = tokio::spawn(run_stream_loop(shared, camera, updates, source, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        Ok(())
    }

    /// Inbound camera-change notification. While streaming this publishes a
    /// single stop segment and gates the worker; the next fix then restarts
    /// the animation from scratch. Repeat notifications while already paused
    /// publish nothing further.
    pub fn camera_changed(&self) {
        let mut locked = self.shared.lock().unwrap();
        if locked.phase != StreamPhase::Streaming {
            return;
        }
        locked.phase = StreamPhase::Paused;
        let _ = self.updates.send(Some(stop_descriptor()));
    }

    /// Cancel the worker, interrupting an in-progress pacing wait. Nothing
    /// is published after this returns.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
    }

    /// Wait for the worker to drain the dataset.
    pub async fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join.await;
        }
    }
}

async fn run_stream_loop<R: Read>(
    shared: Arc<StdMutex<Shared>>,
    camera: Arc<dyn CameraTransform>,
    updates: watch::Sender<Option<AnimationDescriptor>>,
    mut source: SampleSource<R>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut first = true;
    let interval = source.interval();

    loop {
        let next = tokio::select! {
            next = source.next() => next,
            _ = &mut stop_rx => {
                shared.lock().unwrap().phase = StreamPhase::Idle;
                return;
            }
        };

        let Some(result) = next else { break };

        let sample = match result {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("skipping sample: {e}");
                continue;
            }
        };

        let offset = match camera.project(sample.point()).map_err(StreamError::from) {
            Ok(offset) => offset,
            Err(e) => {
                // The transform may become ready later; drop this fix and
                // try again with the next one.
                log::warn!("skipping sample: {e}");
                continue;
            }
        };

        // Publishing under the lock keeps the stop segment from a
        // camera-change notification ordered against sample segments.
        let mut locked = shared.lock().unwrap();
        let is_start = first || locked.phase == StreamPhase::Paused;
        locked.phase = StreamPhase::Streaming;
        let _ = updates.send(Some(moving_descriptor(&sample, offset, is_start, interval)));
        drop(locked);

        first = false;
    }

    shared.lock().unwrap().phase = StreamPhase::Stopped;
}
