use lucerna_core::constants::TRACE_PASS_FATAL_MS;

/// GPU elapsed-time measurement for the trace pass, built on timestamp
/// queries. One begin/end pair per frame, resolved into a mappable buffer
/// and read back synchronously after submit.
///
/// The synchronous readback stalls the pipeline; that cost is accepted
/// because the frame loop is externally throttled anyway and the figure
/// feeds diagnostics, not scheduling.
pub struct PassTimer {
    query_set: wgpu::QuerySet,
    resolve_buffer: wgpu::Buffer,
    readback_buffer: wgpu::Buffer,
    last_ms: Option<f32>,
}

impl PassTimer {
    const BUFFER_SIZE: u64 = 2 * std::mem::size_of::<u64>() as u64;

    pub fn new(device: &wgpu::Device) -> Self {
        let query_set = device.create_query_set(&wgpu::QuerySetDescriptor {
            label: Some("trace-pass-timer"),
            ty: wgpu::QueryType::Timestamp,
            count: 2,
        });
        let resolve_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace-pass-timer-resolve"),
            size: Self::BUFFER_SIZE,
            usage: wgpu::BufferUsages::QUERY_RESOLVE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let readback_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace-pass-timer-readback"),
            size: Self::BUFFER_SIZE,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            query_set,
            resolve_buffer,
            readback_buffer,
            last_ms: None,
        }
    }

    /// Timestamp bracket for the trace pass descriptor.
    pub fn timestamp_writes(&self) -> wgpu::RenderPassTimestampWrites<'_> {
        wgpu::RenderPassTimestampWrites {
            query_set: &self.query_set,
            beginning_of_pass_write_index: Some(0),
            end_of_pass_write_index: Some(1),
        }
    }

    /// Encode query resolution. Must run after the timed pass ended, in
    /// the same encoder.
    pub fn resolve(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.resolve_query_set(&self.query_set, 0..2, &self.resolve_buffer, 0);
        encoder.copy_buffer_to_buffer(
            &self.resolve_buffer,
            0,
            &self.readback_buffer,
            0,
            Self::BUFFER_SIZE,
        );
    }

    /// Block until the submitted frame's timestamps are available and
    /// record the measured pass duration.
    ///
    /// Aborts if the measurement exceeds the sanity bound — a pass that
    /// "took" longer than a second means a stalled driver or broken
    /// queries, and there is nothing sane to render with either way.
    pub fn read(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let slice = self.readback_buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |_| {});
        let _ = device.poll(wgpu::Maintain::Wait);

        let elapsed_ticks = {
            let mapped = slice.get_mapped_range();
            let bytes: &[u8] = &mapped;
            let stamps: &[u64] = bytemuck::cast_slice(bytes);
            stamps[1].saturating_sub(stamps[0])
        };
        self.readback_buffer.unmap();

        let ms = elapsed_ticks as f32 * queue.get_timestamp_period() * 1e-6;
        if ms > TRACE_PASS_FATAL_MS {
            log::error!("trace pass measured {ms} ms, aborting");
            panic!("trace pass exceeded the {TRACE_PASS_FATAL_MS} ms sanity bound");
        }
        self.last_ms = Some(ms);
    }

    /// Last measured trace-pass duration in milliseconds.
    pub fn last_ms(&self) -> Option<f32> {
        self.last_ms
    }

    /// Approximate frame rate the trace pass alone would sustain.
    pub fn fps(&self) -> Option<f32> {
        self.last_ms.filter(|ms| *ms > 0.0).map(|ms| 1000.0 / ms)
    }
}
