//! Pipeline executor.
//!
//! Runs a [`StageList`] over a buffer in list order. The run is
//! all-or-nothing: every stage is validated before any sample is touched,
//! each stage's output is checked for NaN/Inf, and the first failure aborts
//! the run without returning a partial buffer.

use fxchain_core::{Result, SampleBuffer};

use crate::stage::{BufferStage, Stage, StageList};

/// Ordered, validated application of stages to whole buffers.
///
/// A pipeline is plain data (`Send + Sync`); one instance can serve
/// concurrent requests as long as each request brings its own buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: StageList,
}

impl Pipeline {
    /// Create a pipeline from a stage list.
    pub fn new(stages: StageList) -> Self {
        Self { stages }
    }

    /// The stages in processing order.
    pub fn stages(&self) -> &StageList {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Validate every stage's parameters.
    pub fn validate(&self) -> Result<()> {
        self.stages.iter().try_for_each(BufferStage::validate)
    }

    /// Process a buffer through every stage.
    ///
    /// The sample rate is carried through unchanged. An empty pipeline
    /// returns the input as-is.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if any stage has out-of-range parameters
    /// - `NumericInstability` if the input or any stage output holds NaN/Inf
    pub fn process(&self, buffer: SampleBuffer) -> Result<SampleBuffer> {
        self.process_with(buffer, |_, _| {})
    }

    /// Like [`process`](Self::process), calling `on_stage(index, stage)`
    /// after each stage completes.
    pub fn process_with<F>(&self, buffer: SampleBuffer, mut on_stage: F) -> Result<SampleBuffer>
    where
        F: FnMut(usize, &Stage),
    {
        let sample_rate = buffer.sample_rate();
        let input_len = buffer.len();
        buffer.check_finite("input")?;
        self.validate()?;

        let mut buffer = buffer;
        for (index, stage) in self.stages.iter().enumerate() {
            let kind = stage.kind();
            let _span = tracing::debug_span!("stage", index, kind = kind.name()).entered();

            buffer = stage.apply(buffer)?;
            buffer.check_finite(kind.name())?;
            debug_assert_eq!(buffer.sample_rate(), sample_rate, "stages never resample");

            tracing::debug!(len = buffer.len(), peak = buffer.peak(), "stage complete");
            on_stage(index, stage);
        }

        tracing::info!(
            stages = self.stages.len(),
            sample_rate,
            input_len,
            output_len = buffer.len(),
            "pipeline complete"
        );
        Ok(buffer)
    }
}

impl From<StageList> for Pipeline {
    fn from(stages: StageList) -> Self {
        Self::new(stages)
    }
}

/// Process `buffer` through `stages` without building a [`Pipeline`] first.
pub fn process(buffer: SampleBuffer, stages: &StageList) -> Result<SampleBuffer> {
    Pipeline::new(stages.clone()).process(buffer)
}
