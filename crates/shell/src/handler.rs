use scenekit_input::{PointerEvent, WheelEvent};
use scenekit_render::Renderer;
use scenekit_scene::{PerspectiveCamera, Scene};

/// Everything the render callback gets for one frame.
pub struct RenderFrame<'a, R> {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the shell was constructed.
    pub elapsed_time: f32,
    pub scene: &'a mut Scene,
    pub camera: &'a mut PerspectiveCamera,
    pub renderer: &'a mut R,
}

/// A pointer event translated into surface-local pixels.
#[derive(Debug, Clone, Copy)]
pub struct PointerInput<'a> {
    pub x: f32,
    pub y: f32,
    /// The original, untranslated event.
    pub event: &'a PointerEvent,
}

/// User hooks into a [`SceneShell`](crate::SceneShell). Every method defaults
/// to doing nothing.
pub trait ShellHandler<R: Renderer> {
    /// Called once per tick, after the camera is updated. Submitting the
    /// frame to the renderer is the handler's job.
    fn on_render(&mut self, _frame: RenderFrame<'_, R>) {}

    /// Called when the logical surface size changes.
    fn on_resize(&mut self, _width: u32, _height: u32) {}

    fn on_pointer_move(&mut self, _pointer: PointerInput<'_>) {}

    fn on_pointer_click(&mut self, _pointer: PointerInput<'_>) {}

    /// Receives the wheel event unmodified.
    fn on_wheel(&mut self, _event: &WheelEvent) {}
}

/// No hooks at all.
impl<R: Renderer> ShellHandler<R> for () {}

type RenderFn<R> = Box<dyn for<'a> FnMut(RenderFrame<'a, R>)>;
type ResizeFn = Box<dyn FnMut(u32, u32)>;
type PointerFn = Box<dyn for<'a> FnMut(PointerInput<'a>)>;
type WheelFn = Box<dyn FnMut(&WheelEvent)>;

/// Closure slots implementing [`ShellHandler`]. Unset slots are no-ops.
pub struct Callbacks<R> {
    render: Option<RenderFn<R>>,
    resize: Option<ResizeFn>,
    pointer_move: Option<PointerFn>,
    pointer_click: Option<PointerFn>,
    wheel: Option<WheelFn>,
}

impl<R> Default for Callbacks<R> {
    fn default() -> Self {
        Self {
            render: None,
            resize: None,
            pointer_move: None,
            pointer_click: None,
            wheel: None,
        }
    }
}

impl<R> Callbacks<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render(mut self, f: impl for<'a> FnMut(RenderFrame<'a, R>) + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    pub fn with_resize(mut self, f: impl FnMut(u32, u32) + 'static) -> Self {
        self.resize = Some(Box::new(f));
        self
    }

    pub fn with_pointer_move(mut self, f: impl for<'a> FnMut(PointerInput<'a>) + 'static) -> Self {
        self.pointer_move = Some(Box::new(f));
        self
    }

    pub fn with_pointer_click(mut self, f: impl for<'a> FnMut(PointerInput<'a>) + 'static) -> Self {
        self.pointer_click = Some(Box::new(f));
        self
    }

    pub fn with_wheel(mut self, f: impl FnMut(&WheelEvent) + 'static) -> Self {
        self.wheel = Some(Box::new(f));
        self
    }
}

impl<R: Renderer> ShellHandler<R> for Callbacks<R> {
    fn on_render(&mut self, frame: RenderFrame<'_, R>) {
        if let Some(f) = &mut self.render {
            f(frame);
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(f) = &mut self.resize {
            f(width, height);
        }
    }

    fn on_pointer_move(&mut self, pointer: PointerInput<'_>) {
        if let Some(f) = &mut self.pointer_move {
            f(pointer);
        }
    }

    fn on_pointer_click(&mut self, pointer: PointerInput<'_>) {
        if let Some(f) = &mut self.pointer_click {
            f(pointer);
        }
    }

    fn on_wheel(&mut self, event: &WheelEvent) {
        if let Some(f) = &mut self.wheel {
            f(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_render::DebugTextRenderer;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unset_slots_are_noops() {
        let mut cb: Callbacks<DebugTextRenderer> = Callbacks::new();
        ShellHandler::<DebugTextRenderer>::on_resize(&mut cb, 1, 2);
        ShellHandler::<DebugTextRenderer>::on_wheel(&mut cb, &WheelEvent::default());
    }

    #[test]
    fn closures_receive_arguments() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let click_log = seen.clone();
        let mut cb: Callbacks<DebugTextRenderer> = Callbacks::new()
            .with_resize(move |w, h| log.borrow_mut().push(format!("resize {w}x{h}")))
            .with_pointer_click(move |p| {
                click_log
                    .borrow_mut()
                    .push(format!("click {} {}", p.x, p.y))
            });

        ShellHandler::<DebugTextRenderer>::on_resize(&mut cb, 800, 600);
        let ev = PointerEvent::new(30.0, 40.0);
        ShellHandler::<DebugTextRenderer>::on_pointer_click(
            &mut cb,
            PointerInput {
                x: 3.0,
                y: 4.0,
                event: &ev,
            },
        );

        assert_eq!(*seen.borrow(), vec!["resize 800x600", "click 3 4"]);
    }

    #[test]
    fn render_slot_can_submit_a_frame() {
        let mut cb: Callbacks<DebugTextRenderer> =
            Callbacks::new().with_render(|frame: RenderFrame<'_, DebugTextRenderer>| {
                let _ = frame.renderer.render(frame.scene, frame.camera);
            });
        let mut scene = Scene::new();
        let mut camera = PerspectiveCamera::default();
        let mut renderer = DebugTextRenderer::new();
        ShellHandler::on_render(
            &mut cb,
            RenderFrame {
                delta: 0.016,
                elapsed_time: 0.016,
                scene: &mut scene,
                camera: &mut camera,
                renderer: &mut renderer,
            },
        );
        assert_eq!(renderer.frames(), 1);
    }
}
