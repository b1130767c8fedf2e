use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_failure::RenderFailure;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::{CancelToken, GenerationToken, RenderGeneration};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer_cancelable;
use crate::core::colour::kinds::GradientKind;
use crate::core::colour::policy::ColourPolicy;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::result_grid::ResultGrid;
use crate::core::engine::{RenderEngine, RenderRequest};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, warn};

struct SharedState {
    generation: RenderGeneration,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(GenerationToken, RenderRequest)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    engine: Arc<RenderEngine>,
    gradient: GradientKind,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

impl SharedState {
    fn pending(&self) -> MutexGuard<'_, Option<(GenerationToken, RenderRequest)>> {
        self.latest_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        engine: Arc<RenderEngine>,
        gradient: GradientKind,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> Self {
        let shared = Arc::new(SharedState {
            generation: RenderGeneration::new(),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            engine,
            gradient,
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("interactive-render".to_string())
            .spawn(move || {
                Self::worker_loop(&worker_shared);
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "failed to spawn render worker");
                None
            }
        };

        Self { shared, worker }
    }

    /// Queues `request`, replacing anything not yet started and cancelling
    /// the render in flight. Returns the generation assigned to it.
    pub fn submit_request(&self, request: RenderRequest) -> u64 {
        let token = self.shared.generation.begin();
        let generation = token.generation();

        *self.shared.pending() = Some((token, request));
        self.shared.wake.notify_one();

        generation
    }

    pub fn shutdown(&mut self) {
        {
            // Stored under the request lock so the worker cannot miss the wake.
            let _pending = self.shared.pending();
            self.shared.shutdown.store(true, Ordering::Release);
        }
        self.shared.generation.supersede();
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (token, request) = {
                let mut guard = shared.pending();
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(job) = guard.take() {
                        break job;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let job_generation = token.generation();
            let cancel_token =
                || shared.shutdown.load(Ordering::Relaxed) || token.is_cancelled();

            let start = Instant::now();
            let result = Self::render_request(shared, &request, &cancel_token);
            let render_duration = start.elapsed();

            let event = match result {
                Ok((grid, pixel_buffer)) => RenderEvent::Frame(FrameData {
                    generation: job_generation,
                    grid,
                    pixel_buffer,
                    render_duration,
                }),
                Err(RenderOutcome::Cancelled) => {
                    debug!(generation = job_generation, "render superseded");
                    continue;
                }
                Err(RenderOutcome::Error(message)) => RenderEvent::Error(RenderFailure {
                    generation: job_generation,
                    message,
                }),
            };

            if token.is_cancelled() {
                continue;
            }

            shared.presenter_port.present(event);
            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }

    fn render_request<C: CancelToken>(
        shared: &SharedState,
        request: &RenderRequest,
        cancel: &C,
    ) -> Result<(ResultGrid, PixelBuffer), RenderOutcome> {
        let grid = shared.engine.render(request, cancel).map_err(|err| {
            if err.is_cancelled() {
                RenderOutcome::Cancelled
            } else {
                RenderOutcome::Error(err.to_string())
            }
        })?;

        let policy = ColourPolicy::new(shared.gradient, request.max_iterations);
        let pixel_buffer = generate_pixel_buffer_cancelable(&grid, &policy, request.mode, cancel)
            .map_err(|err| {
                if err.is_cancelled() {
                    RenderOutcome::Cancelled
                } else {
                    RenderOutcome::Error(err.to_string())
                }
            })?;

        Ok((grid, pixel_buffer))
    }
}

enum RenderOutcome {
    Cancelled,
    Error(String),
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::core::data::complex::Complex;
    use crate::core::data::viewport::Viewport;
    use crate::core::engine::EngineConfig;
    use crate::core::fractals::render_mode::RenderMode;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for_events(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        loop {
            let events = sink.take_events();
            if !events.is_empty() {
                return events;
            }
            if start.elapsed() >= timeout {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn create_controller(presenter_port: &Arc<MockPresenterPort>) -> InteractiveController {
        let engine = RenderEngine::new(EngineConfig {
            worker_threads: Some(2),
            ..EngineConfig::default()
        })
        .unwrap();

        InteractiveController::new(
            Arc::new(engine),
            GradientKind::BlueWhite,
            Arc::clone(presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
        )
    }

    fn create_test_request() -> RenderRequest {
        RenderRequest::new(
            RenderMode::Mandelbrot,
            Viewport::new(-2.5, 1.0, -1.0, 1.0).unwrap(),
            4,
            4,
        )
        .with_max_iterations(10)
    }

    fn create_error_request() -> RenderRequest {
        // Julia rendering without a parameter is rejected before the sweep.
        RenderRequest::new(
            RenderMode::Julia,
            Viewport::new(-0.1, 0.1, -0.1, 0.1).unwrap(),
            4,
            4,
        )
    }

    fn extract_generation(events: &[RenderEvent]) -> u64 {
        events
            .first()
            .map(RenderEvent::generation)
            .expect("Should have at least one event with generation")
    }

    #[test]
    fn test_submit_request_emits_frame() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let generation = controller.submit_request(create_test_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        let mut saw_frame = false;
        for event in events {
            match event {
                RenderEvent::Frame(frame) => {
                    assert_eq!(frame.generation, generation);
                    assert!(generation > 0, "generation should be non-zero");
                    assert_eq!((frame.grid.width(), frame.grid.height()), (4, 4));
                    assert_eq!(frame.pixel_buffer.buffer().len(), 4 * 4 * 3);
                    saw_frame = true;
                }
                RenderEvent::Error(error) => {
                    panic!("unexpected render error: {}", error.message);
                }
            }
        }

        assert!(saw_frame, "expected a frame event");
        controller.shutdown();
    }

    #[test]
    fn test_generation_ids_increment() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        controller.submit_request(create_test_request());
        let events_a = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events_a.is_empty(), "expected events from request A");
        let gen_a = extract_generation(&events_a);

        controller.submit_request(create_test_request());
        let events_b = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events_b.is_empty(), "expected events from request B");
        let gen_b = extract_generation(&events_b);

        assert!(
            gen_b > gen_a,
            "Generation B ({}) should be greater than A ({})",
            gen_b,
            gen_a
        );

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_starts_at_zero() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_updates_after_frame_completion() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let submitted_generation = controller.submit_request(create_test_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        let completed_generation = extract_generation(&events);

        assert_eq!(completed_generation, submitted_generation);
        assert_eq!(controller.last_completed_generation(), completed_generation);

        controller.shutdown();
    }

    #[test]
    fn test_invalid_request_emits_error_event() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let submitted_generation = controller.submit_request(create_error_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected an error render event");

        let mut saw_error = false;
        for event in &events {
            if let RenderEvent::Error(error) = event {
                saw_error = true;
                assert_eq!(error.generation, submitted_generation);
                assert!(
                    error.message.contains("julia parameter"),
                    "unexpected message: {}",
                    error.message
                );
            }
        }

        assert!(saw_error, "expected at least one error event");
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_is_monotonic_across_mixed_completions() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let frame_generation = controller.submit_request(create_test_request());
        let frame_events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&frame_events), frame_generation);
        let after_frame = controller.last_completed_generation();

        let error_generation = controller.submit_request(create_error_request());
        let error_events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&error_events), error_generation);
        let after_error = controller.last_completed_generation();

        let frame_generation_2 = controller.submit_request(create_test_request());
        let frame_events_2 = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert_eq!(extract_generation(&frame_events_2), frame_generation_2);
        let after_frame_2 = controller.last_completed_generation();

        assert!(after_frame >= frame_generation);
        assert!(after_error >= after_frame);
        assert!(after_frame_2 >= after_error);

        controller.shutdown();
    }

    #[test]
    fn test_rapid_requests_do_not_emit_cancellation_errors() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let mut last_gen = 0;
        for _ in 0..5 {
            last_gen = controller.submit_request(create_test_request());
        }

        thread::sleep(Duration::from_millis(500));
        let events = presenter_port.take_events();

        for event in &events {
            if let RenderEvent::Error(err) = event {
                panic!(
                    "Unexpected error event - cancellation should not emit errors: {}",
                    err.message
                );
            }
        }

        let max_emitted_gen = events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Frame(frame) => Some(frame.generation),
                RenderEvent::Error(_) => None,
            })
            .max()
            .unwrap_or(0);

        assert!(max_emitted_gen > 0, "Expected at least one frame event");
        assert!(
            max_emitted_gen <= last_gen,
            "Emitted generation {} should be <= last submitted {}",
            max_emitted_gen,
            last_gen
        );

        controller.shutdown();
    }

    #[test]
    fn test_frames_carry_matching_grid_and_buffer() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        let request = RenderRequest::new(
            RenderMode::FilledJulia,
            Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
            9,
            5,
        )
        .with_julia_parameter(Complex::ZERO);

        controller.submit_request(request);
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        for event in events {
            if let RenderEvent::Frame(frame) = event {
                assert_eq!(frame.grid.cells().len(), 45);
                assert_eq!(
                    frame.pixel_buffer.buffer().len(),
                    frame.grid.cells().len() * 3,
                    "Frame buffer should be complete, not partial"
                );
            }
        }

        controller.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = create_controller(&presenter_port);

        controller.shutdown();
        controller.shutdown();

        assert!(presenter_port.take_events().is_empty());
    }

    #[test]
    fn test_shutdown_of_idle_worker_never_hangs() {
        let (done_tx, done_rx) = std::sync::mpsc::channel();

        thread::spawn(move || {
            for _ in 0..200 {
                let presenter_port = Arc::new(MockPresenterPort::default());
                let mut controller = create_controller(&presenter_port);
                controller.shutdown();
            }
            let _ = done_tx.send(());
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(30)).is_ok(),
            "controller shutdown did not return"
        );
    }
}
