use {
    crate::*,
    std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    tokio::{
        sync::{mpsc, oneshot},
        task::{JoinHandle, spawn_blocking},
    },
};

// capacity of the sensor input channel
const CHANNEL_CAPACITY: usize = 4;

// delay before reconnecting after failure
const WAIT_BEFORE_RECONNECT_MS: u64 = 100;

/// A blocking frame source.
///
/// All three methods are called from the same worker thread, so devices with
/// thread affinity are fine.
pub trait SensorDevice: Send + 'static {
    /// Open the device and report what it negotiated.
    fn open(&mut self) -> Result<SensorInfo, SensorError>;
    /// Close the device, if open.
    fn close(&mut self);
    /// Block until the next message is available.
    fn blocking_capture(&mut self) -> Result<SensorMessage, SensorError>;
}

pub struct SensorIn {
    receiver: mpsc::Receiver<SensorMessage>,
    cancel: Arc<AtomicBool>,
    info: SensorInfo,
    join_handle: Option<JoinHandle<()>>,
}

impl SensorIn {
    async fn spawn_worker<D: SensorDevice>(
        mut device: D,
        sender: mpsc::Sender<SensorMessage>,
        cancel: Arc<AtomicBool>,
    ) -> Result<(JoinHandle<()>, SensorInfo), SensorError> {
        let (init_tx, init_rx) = oneshot::channel::<Result<SensorInfo, SensorError>>();

        let join_handle = spawn_blocking(move || {
            match device.open() {
                Ok(info) => {
                    let _ = init_tx.send(Ok(info));
                }
                Err(e) => {
                    let _ = init_tx.send(Err(e));
                    return;
                }
            }

            while !cancel.load(Ordering::Relaxed) {
                // keep pumping messages until capturing fails
                log::info!("sensor worker: starting capture loop");
                loop {
                    if cancel.load(Ordering::Relaxed) {
                        break;
                    }
                    match device.blocking_capture() {
                        Ok(message) => {
                            if sender.blocking_send(message).is_err() {
                                // receiver is gone, nobody wants frames anymore
                                device.close();
                                return;
                            }
                        }
                        Err(SensorError::Exhausted) => {
                            log::info!("sensor worker: device exhausted");
                            device.close();
                            return;
                        }
                        Err(e) => {
                            log::error!("sensor worker: capture failed: {}", e);
                            break;
                        }
                    }
                }

                // close, wait, and reopen the device
                while !cancel.load(Ordering::Relaxed) {
                    log::info!("sensor worker: reconnecting...");
                    device.close();
                    std::thread::sleep(std::time::Duration::from_millis(
                        WAIT_BEFORE_RECONNECT_MS,
                    ));
                    match device.open() {
                        Ok(_) => break,
                        Err(e) => log::error!("sensor worker: reopen failed: {}", e),
                    }
                }
            }
            device.close();
        });

        let info = init_rx
            .await
            .map_err(|_| SensorError::Device("worker thread died during init".to_string()))??;

        Ok((join_handle, info))
    }

    /// Open `device` on a dedicated worker thread.
    pub async fn open<D: SensorDevice>(device: D) -> Result<Self, SensorError> {
        let (sender, receiver) = mpsc::channel::<SensorMessage>(CHANNEL_CAPACITY);
        let cancel = Arc::new(AtomicBool::new(false));
        let (join_handle, info) = Self::spawn_worker(device, sender, Arc::clone(&cancel)).await?;
        Ok(Self {
            receiver,
            cancel,
            info,
            join_handle: Some(join_handle),
        })
    }

    pub fn info(&self) -> SensorInfo {
        self.info
    }

    /// Next message from the device. Fails once the worker has stopped and
    /// every buffered message has been taken.
    pub async fn capture(&mut self) -> Result<SensorMessage, SensorError> {
        match self.receiver.recv().await {
            Some(message) => Ok(message),
            None => Err(SensorError::Stream("sensor input channel closed".to_string())),
        }
    }
}

impl Drop for SensorIn {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.receiver.close();
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}
