//! Dedicated compute pool for analyses.
//!
//! The pixel loop is CPU-bound and proportional to the image area. Submitting through a
//! [`ComputePool`] keeps it off whatever thread accepted the request: the decode and the
//! parallel chunk accumulation both run on the pool's own rayon threads. Each job owns its
//! input and its raster, so abandoning a [`PendingAnalysis`] leaves nothing behind but a
//! result nobody reads.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, error};

use crate::index_pipeline::analysis::ndvi::NdviPipeline;
use crate::index_pipeline::analysis::types::IndexResult;
use crate::index_pipeline::bands::BandMapping;
use crate::index_pipeline::common::{PipelineError, Result};
use crate::index_pipeline::decode::RasterDecoder;

pub struct ComputePool<D: RasterDecoder, M: BandMapping> {
    pool: rayon::ThreadPool,
    pipeline: Arc<NdviPipeline<D, M>>,
}

impl<D, M> ComputePool<D, M>
where
    D: RasterDecoder + 'static,
    M: BandMapping + 'static,
{
    /// Starts `num_threads` workers; 0 lets rayon pick one per logical CPU.
    pub fn new(pipeline: NdviPipeline<D, M>, num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("ndvi-compute-{}", i))
            .panic_handler(|_| error!("Analysis job panicked"))
            .build()
            .map_err(|e| PipelineError::WorkerUnavailable(e.to_string()))?;

        debug!("Compute pool started with {} threads", pool.current_num_threads());

        Ok(Self {
            pool,
            pipeline: Arc::new(pipeline),
        })
    }

    pub fn pipeline(&self) -> &NdviPipeline<D, M> {
        &self.pipeline
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queues an analysis of `input_data` and returns immediately.
    pub fn submit(&self, input_data: Vec<u8>) -> PendingAnalysis {
        let (sender, receiver) = mpsc::sync_channel(1);
        let pipeline = Arc::clone(&self.pipeline);

        self.pool.spawn(move || {
            let result = pipeline.analyze(&input_data);
            if sender.send(result).is_err() {
                debug!("Analysis finished after the caller stopped waiting");
            }
        });

        PendingAnalysis { receiver }
    }
}

/// Handle to a submitted analysis. Dropping it abandons the result.
pub struct PendingAnalysis {
    receiver: Receiver<Result<IndexResult>>,
}

impl PendingAnalysis {
    pub fn wait(self) -> Result<IndexResult> {
        self.receiver.recv().map_err(|_| {
            PipelineError::WorkerUnavailable("compute worker exited without a result".to_string())
        })?
    }

    pub fn wait_timeout(self, timeout: Duration) -> Result<IndexResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PipelineError::TimedOut(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(PipelineError::WorkerUnavailable(
                "compute worker exited without a result".to_string(),
            )),
        }
    }
}
