use {
    crate::*,
    roadmask::{Diagnostics, Pipeline},
    sensor::{SensorIn, SensorMessage},
    std::{sync::Arc, time::SystemTime},
    tokio::{
        sync::Notify,
        task::{JoinHandle, spawn_blocking},
        time::{MissedTickBehavior, interval},
    },
};

pub type DiagnosticsSink = Box<dyn Diagnostics + Send>;

/// Publish the cached outputs once, stamped now. Returns the epoch that was
/// published.
pub fn republish<P: Publisher>(
    cache: &OutputCache,
    config: &NodeConfig,
    publisher: &mut P,
) -> Result<u64, NodeError> {
    let snapshot = cache.snapshot();
    let stamp = SystemTime::now();
    let message = |channel: &str, payload: Payload| Published {
        channel: channel.to_string(),
        frame_id: config.frame_id.clone(),
        stamp,
        epoch: snapshot.epoch,
        payload,
    };
    publisher.publish(message(
        &config.channels.pothole_depth,
        Payload::Depth(Arc::clone(&snapshot.pothole_depth)),
    ))?;
    publisher.publish(message(
        &config.channels.lane_depth,
        Payload::Depth(Arc::clone(&snapshot.lane_depth)),
    ))?;
    publisher.publish(message(
        &config.channels.output_info,
        Payload::Intrinsics(Arc::clone(&snapshot.intrinsics)),
    ))?;
    Ok(snapshot.epoch)
}

/// Frame buffer, pipeline and output cache wired together.
///
/// Processing runs once per color frame on a blocking worker, never more than
/// one cycle at a time. Republishing runs on its own timer and always sends
/// the last completed cycle.
pub struct Node {
    config: NodeConfig,
    pipeline: Arc<Pipeline>,
    frames: Arc<FrameBuffer>,
    cache: Arc<OutputCache>,
}

impl Node {
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        log::info!(
            "node: {}x{} frames, republishing every {:?} as {}",
            config.frame_size.x,
            config.frame_size.y,
            config.output_period(),
            config.frame_id
        );
        Ok(Self {
            pipeline: Arc::new(Pipeline::new(config.pipeline.clone())?),
            frames: Arc::new(FrameBuffer::new(config.frame_size)),
            cache: Arc::new(OutputCache::new(config.frame_size)),
            config,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn frames(&self) -> &Arc<FrameBuffer> {
        &self.frames
    }

    pub fn cache(&self) -> &Arc<OutputCache> {
        &self.cache
    }

    /// Route one sensor message into the frame buffer. Malformed frames are
    /// logged and dropped.
    pub fn handle(&self, message: SensorMessage) {
        match message {
            SensorMessage::Color(frame) => {
                let sequence = frame.epoch;
                log::debug!("receiving color frame {} on {}", sequence, self.config.channels.color);
                if let Err(error) = self.frames.update_color(frame) {
                    log::warn!("rejecting color frame {}: {}", sequence, error);
                }
            }
            SensorMessage::Depth(frame) => {
                let sequence = frame.epoch;
                log::debug!("receiving depth frame {} on {}", sequence, self.config.channels.depth);
                if let Err(error) = self.frames.update_depth(frame) {
                    log::warn!("rejecting depth frame {}: {}", sequence, error);
                }
            }
            SensorMessage::Info(intrinsics) => {
                log::debug!("receiving camera info on {}", self.config.channels.camera_info);
                self.frames.update_intrinsics(intrinsics);
            }
        }
    }

    /// Run the pipeline on every color frame until the frame buffer closes.
    pub fn spawn_processing(&self, diagnostics: Option<DiagnosticsSink>) -> JoinHandle<()> {
        let pipeline = Arc::clone(&self.pipeline);
        let frames = Arc::clone(&self.frames);
        let cache = Arc::clone(&self.cache);
        let mut receiver = frames.subscribe();
        tokio::spawn(async move {
            let mut diagnostics = diagnostics;
            while receiver.changed().await.is_ok() {
                let Some(color) = frames.take_color(&mut receiver) else {
                    continue;
                };
                let inputs = frames.inputs();
                let pipeline = Arc::clone(&pipeline);
                let mut sink = diagnostics.take();
                let result = spawn_blocking(move || {
                    let output = match sink.as_mut() {
                        Some(sink) => pipeline.run_with(&color.inner, &inputs.depth, &mut **sink),
                        None => pipeline.run(&color.inner, &inputs.depth),
                    };
                    (output, inputs.intrinsics, color.epoch, sink)
                })
                .await;
                match result {
                    Ok((Ok(output), intrinsics, sequence, sink)) => {
                        diagnostics = sink;
                        let potholes = output.potholes().count();
                        let lanes = output.lanes().count();
                        let epoch = cache.store(output.pothole_depth, output.lane_depth, intrinsics);
                        log::debug!(
                            "cycle {} from frame {}: {} potholes, {} lanes",
                            epoch,
                            sequence,
                            potholes,
                            lanes
                        );
                    }
                    Ok((Err(error), _, sequence, sink)) => {
                        diagnostics = sink;
                        log::warn!("skipping frame {}: {}", sequence, error);
                    }
                    Err(error) => {
                        log::error!("processing worker failed: {}", error);
                        break;
                    }
                }
            }
            log::info!("processing stopped");
        })
    }

    /// Republish the cache every output period. Publishes one last time and
    /// exits when `stop` is notified, or exits when the publisher fails.
    pub fn spawn_republish<P: Publisher>(&self, mut publisher: P, stop: Arc<Notify>) -> JoinHandle<()> {
        let cache = Arc::clone(&self.cache);
        let config = self.config.clone();
        tokio::spawn(async move {
            let mut ticker = interval(config.output_period());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(error) = republish(&cache, &config, &mut publisher) {
                            log::error!("republish failed: {}", error);
                            break;
                        }
                    }
                    _ = stop.notified() => {
                        if let Err(error) = republish(&cache, &config, &mut publisher) {
                            log::error!("final republish failed: {}", error);
                        }
                        break;
                    }
                }
            }
        })
    }

    /// Consume `sensorin` until it ends, then finish the frame in flight and
    /// publish the final outputs.
    pub async fn run<P: Publisher>(
        &self,
        mut sensorin: SensorIn,
        publisher: P,
        diagnostics: Option<DiagnosticsSink>,
    ) -> Result<(), NodeError> {
        let processing = self.spawn_processing(diagnostics);
        let stop = Arc::new(Notify::new());
        let republishing = self.spawn_republish(publisher, Arc::clone(&stop));

        loop {
            match sensorin.capture().await {
                Ok(message) => self.handle(message),
                Err(error) => {
                    log::info!("sensor stream ended: {}", error);
                    break;
                }
            }
        }

        self.frames.close();
        processing.await?;
        stop.notify_one();
        republishing.await?;
        log::info!(
            "{} cycles completed, {} color frames dropped",
            self.cache.epoch(),
            self.frames.dropped()
        );
        Ok(())
    }
}
